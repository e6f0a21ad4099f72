#[cfg(test)]
mod tests {
    use crate::files::VirtualFileSet;
    use crate::host::HostCallbacks;
    use crate::output::{OutputChannel, OutputEntry, Severity};
    use crate::session::manager::{RunOutcome, SessionManager};
    use crate::session::mode::SessionMode;
    use crate::session::runtime::{Runtime, RuntimeFactory, RuntimeFailure};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock runtime understanding a tiny line-oriented command language:
    //   def NAME    define NAME
    //   use NAME    print NAME if defined, otherwise report an error
    //   say TEXT    print TEXT
    //   hmm TEXT    warn TEXT
    //   oops TEXT   report TEXT as an error
    //   crash MSG   signal a runtime failure
    struct MockRuntime {
        host: HostCallbacks,
        defined: HashSet<String>,
        resets: Arc<AtomicUsize>,
    }

    impl Runtime for MockRuntime {
        fn run(&mut self, code: &str, _interactive: bool) -> Result<(), RuntimeFailure> {
            for line in code.lines() {
                let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
                match command {
                    "def" => {
                        self.defined.insert(argument.to_string());
                    }
                    "use" if self.defined.contains(argument) => self.host.print(argument),
                    "use" => self.host.error(&format!("undefined: {}", argument)),
                    "say" => self.host.print(argument),
                    "hmm" => self.host.warn(argument),
                    "oops" => self.host.error(argument),
                    "crash" => return Err(RuntimeFailure::new(argument)),
                    _ => {}
                }
            }
            Ok(())
        }

        fn reset(&mut self) {
            self.defined.clear();
            self.resets.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct MockFactory {
        constructed: Arc<AtomicUsize>,
        resets: Arc<AtomicUsize>,
    }

    impl RuntimeFactory for MockFactory {
        type Runtime = MockRuntime;

        fn construct(&self, host: HostCallbacks) -> MockRuntime {
            self.constructed.fetch_add(1, Ordering::SeqCst);
            MockRuntime {
                host,
                defined: HashSet::new(),
                resets: self.resets.clone(),
            }
        }
    }

    fn manager() -> (SessionManager<MockFactory>, OutputChannel, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let factory = MockFactory::default();
        let constructed = factory.constructed.clone();
        let resets = factory.resets.clone();
        let output = OutputChannel::new();
        let host = HostCallbacks::new(output.clone(), VirtualFileSet::seeded("main.rhai"));
        (SessionManager::new(factory, host), output, constructed, resets)
    }

    fn texts(output: &OutputChannel) -> Vec<String> {
        output.entries().into_iter().map(|e| e.text).collect()
    }

    #[test]
    fn test_both_slots_constructed_eagerly() {
        let (_manager, output, constructed, _) = manager();
        assert_eq!(constructed.load(Ordering::SeqCst), 2);
        assert!(output.is_empty());
    }

    #[test]
    fn test_interactive_state_survives_batch_runs() {
        let (mut manager, output, _, _) = manager();

        manager.run_code("def x", true);
        manager.run_code("def y\nsay batch", false);
        manager.run_code("use x\nuse y", true);

        assert_eq!(texts(&output), vec!["batch", "x", "undefined: y"]);
    }

    #[test]
    fn test_batch_is_reset_after_each_run() {
        let (mut manager, output, _, resets) = manager();

        assert_eq!(manager.run_code("def x", false), RunOutcome::Completed);
        manager.run_code("use x", false);

        assert_eq!(texts(&output), vec!["undefined: x"]);
        assert_eq!(resets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_interactive_is_never_reset() {
        let (mut manager, _, _, resets) = manager();
        manager.run_code("def x", true);
        manager.run_code("use x", true);
        assert_eq!(resets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_emits_prefixed_error_and_replaces_slot() {
        let (mut manager, output, constructed, resets) = manager();

        let outcome = manager.run_code("def x\ncrash boom", false);

        assert_eq!(outcome, RunOutcome::Recovered);
        assert_eq!(
            output.entries(),
            vec![OutputEntry::new("Uncaught runtime error: boom", Severity::Err)]
        );
        assert_eq!(constructed.load(Ordering::SeqCst), 3);
        // A failed batch run is replaced, not reset.
        assert_eq!(resets.load(Ordering::SeqCst), 0);
        assert_eq!(manager.generation(SessionMode::Batch), 1);
        assert_eq!(manager.generation(SessionMode::Interactive), 0);
    }

    #[test]
    fn test_batch_failure_leaves_interactive_untouched() {
        let (mut manager, output, _, _) = manager();

        manager.run_code("def x", true);
        manager.run_code("crash batch died", false);
        manager.run_code("def z\nuse z", false);
        manager.run_code("use x", true);

        assert_eq!(
            texts(&output),
            vec!["Uncaught runtime error: batch died", "z", "x"]
        );
    }

    #[test]
    fn test_interactive_failure_discards_its_state_only() {
        let (mut manager, output, _, _) = manager();

        manager.run_code("def x", true);
        manager.run_code("crash repl died", true);
        manager.run_code("use x", true);
        manager.run_code("say still fine", false);

        assert_eq!(
            texts(&output),
            vec![
                "Uncaught runtime error: repl died",
                "undefined: x",
                "still fine"
            ]
        );
        assert_eq!(manager.generation(SessionMode::Interactive), 1);
        assert_eq!(manager.generation(SessionMode::Batch), 0);
    }

    #[test]
    fn test_output_before_failure_is_kept_in_order() {
        let (mut manager, output, _, _) = manager();

        manager.run_in(SessionMode::Batch, "say 1\nhmm 2\noops 3\ncrash 4");

        assert_eq!(
            output.entries(),
            vec![
                OutputEntry::new("1", Severity::Print),
                OutputEntry::new("2", Severity::Warn),
                OutputEntry::new("3", Severity::Err),
                OutputEntry::new("Uncaught runtime error: 4", Severity::Err),
            ]
        );
    }

    #[test]
    fn test_repeated_failures_keep_recovering() {
        let (mut manager, _, constructed, _) = manager();
        for _ in 0..3 {
            assert_eq!(manager.run_code("crash again", false), RunOutcome::Recovered);
        }
        assert_eq!(manager.generation(SessionMode::Batch), 3);
        assert_eq!(constructed.load(Ordering::SeqCst), 5);
        assert_eq!(manager.run_code("say ok", false), RunOutcome::Completed);
    }
}
