//! # Integration Tests
//!
//! Cross-crate end-to-end tests.
//!
//! Covers:
//! - Blueprint round trips through the config loader
//! - Console + file ingestion, merge and fan-out over real files
//! - Abort and isolation paths in both dispatch topologies

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ScrambleBlueprint, DEFAULT_OUTPUT_FILE};

    #[test]
    fn test_reference_blueprint_survives_toml() {
        let blueprint = ScrambleBlueprint::reference("input.txt", DEFAULT_OUTPUT_FILE);
        let toml = ConfigLoader::render(&blueprint, ConfigFormat::Toml).unwrap();
        let loaded = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();

        assert_eq!(loaded.merge, blueprint.merge);
        assert_eq!(loaded.sources[1].path(), blueprint.sources[1].path());
        assert_eq!(loaded.sinks[1].path(), blueprint.sinks[1].path());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::{self, Cursor, Write};
    use std::sync::{Arc, Mutex};

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ContractError, SharedSink, SharedSource, SinkType};
    use dispatcher::{create_sink, Dispatcher, FileSink, SinkOutcome};
    use ingestion::{ConsoleIo, FileSource, IngestionError, IngestionPipeline};
    use interleave::Interleaver;
    use tempfile::tempdir;

    /// Writer whose bytes stay readable after the console takes ownership
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    /// Console + file in, console + file out: the reference topology.
    #[tokio::test]
    async fn test_e2e_reference_topology() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("test.out");
        std::fs::write(&input, "f0\nf1\nf2\n").unwrap();

        let screen = SharedBuffer::default();
        let console = Arc::new(ConsoleIo::new(
            "console",
            Cursor::new("c0\nc1\nquit\nignored\n"),
            screen.clone(),
        ));

        let sources: Vec<SharedSource> = vec![
            console.clone(),
            Arc::new(FileSource::new("input_file", &input)),
        ];
        let sinks: Vec<SharedSink> = vec![
            console,
            Arc::new(FileSink::from_params(
                "output_file",
                &[("path".to_string(), output.display().to_string())].into(),
            )),
        ];

        let collected = IngestionPipeline::with_sources(sources)
            .collect_all()
            .await
            .unwrap();
        let merged = Interleaver::default().merge(collected);
        let report = Dispatcher::new(sinks).broadcast(merged).await;

        assert!(report.all_succeeded());
        let expected = "c0\nf0\nc1\nf1\nf2\n";
        assert_eq!(screen.contents(), expected);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), expected);
    }

    /// A blueprint with file sources and file sinks, dispatched in staged mode.
    #[tokio::test]
    async fn test_e2e_blueprint_staged() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "Hello\n").unwrap();
        std::fs::write(&b, "World\r\nis big").unwrap();

        let out1 = dir.path().join("out1.txt");
        let out2 = dir.path().join("nested").join("out2.txt");
        let content = format!(
            r#"
[merge]
dispatch = "staged"

[[sources]]
name = "a"
source_type = "file"
[sources.params]
path = {a:?}

[[sources]]
name = "b"
source_type = "file"
[sources.params]
path = {b:?}

[[sinks]]
name = "out1"
sink_type = "file"
[sinks.params]
path = {out1:?}

[[sinks]]
name = "out2"
sink_type = "file"
[sinks.params]
path = {out2:?}

[[sinks]]
name = "log"
sink_type = "log"
"#,
            a = a.display().to_string(),
            b = b.display().to_string(),
            out1 = out1.display().to_string(),
            out2 = out2.display().to_string(),
        );
        let blueprint = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();

        let sources: Vec<SharedSource> = blueprint
            .sources
            .iter()
            .map(|c| Arc::new(FileSource::from_params(&c.name, &c.params).unwrap()) as SharedSource)
            .collect();
        let sinks: Vec<SharedSink> = blueprint
            .sinks
            .iter()
            .filter(|c| c.sink_type != SinkType::Console)
            .map(|c| create_sink(c).unwrap())
            .collect();

        let staged = Dispatcher::new(sinks).stage();
        let collected = IngestionPipeline::with_sources(sources)
            .collect_all()
            .await
            .unwrap();
        let merged = Interleaver::new(blueprint.merge.policy).merge(collected);
        let report = staged.publish(merged).await;

        assert_eq!(report.succeeded(), 3);
        let expected = "Hello\nWorld\nis big\n";
        assert_eq!(std::fs::read_to_string(&out1).unwrap(), expected);
        assert_eq!(std::fs::read_to_string(&out2).unwrap(), expected);
    }

    /// Console input ends before the sentinel: nothing is dispatched.
    #[tokio::test]
    async fn test_e2e_console_eof_aborts_staged_run() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("test.out");
        let screen = SharedBuffer::default();
        let console = Arc::new(ConsoleIo::new(
            "console",
            Cursor::new("c0\nc1\n"),
            screen.clone(),
        ));

        let sinks: Vec<SharedSink> = vec![
            console.clone(),
            Arc::new(FileSink::from_params(
                "output_file",
                &[("path".to_string(), output.display().to_string())].into(),
            )),
        ];
        let staged = Dispatcher::new(sinks).stage();

        let err = IngestionPipeline::with_sources(vec![console as SharedSource])
            .collect_all()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Collect {
                error: ContractError::UnexpectedEof { .. },
                ..
            }
        ));

        let report = staged.abandon().await;
        assert!(report.sinks.iter().all(|r| r.outcome == SinkOutcome::Skipped));
        assert_eq!(screen.contents(), "");
        assert!(!output.exists());
    }

    /// One file sink cannot be created; the other still receives everything.
    #[tokio::test]
    async fn test_e2e_file_sink_failure_isolated() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let good_path = dir.path().join("good.txt");
        let sinks: Vec<SharedSink> = vec![
            Arc::new(FileSink::from_params(
                "bad",
                &[(
                    "path".to_string(),
                    blocker.join("out.txt").display().to_string(),
                )]
                .into(),
            )),
            Arc::new(FileSink::from_params(
                "good",
                &[("path".to_string(), good_path.display().to_string())].into(),
            )),
        ];

        let merged = Interleaver::default().merge(vec![
            vec!["x".to_string()],
            vec!["y".to_string(), "z".to_string()],
        ]);
        let report = Dispatcher::new(sinks).broadcast(merged).await;

        assert_eq!(report.failed(), 1);
        match report.get("bad") {
            Some(SinkOutcome::Failed { error }) => {
                assert!(error.starts_with("sink 'bad' write error:"), "{error}")
            }
            other => panic!("unexpected outcome for 'bad': {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&good_path).unwrap(), "x\ny\nz\n");
    }
}
