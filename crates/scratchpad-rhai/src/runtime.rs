use crate::engine::{build_engine, is_fatal};
use rhai::{AST, Dynamic, Engine, Scope};
use scratchpad_core::config::EngineConfig;
use scratchpad_core::{HostCallbacks, Runtime, RuntimeFactory, RuntimeFailure};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// How a single evaluation went wrong.
enum ScriptError {
    /// The script itself is at fault; reported through `error` and the run
    /// still counts as completed.
    Reported(String),
    /// The engine could not continue; surfaced as a runtime failure.
    Fatal(String),
}

/// A live rhai instance with its own variables and script-defined functions.
pub struct RhaiRuntime {
    engine: Engine,
    scope: Scope<'static>,
    functions: AST,
    host: HostCallbacks,
}

impl RhaiRuntime {
    pub fn new(config: &EngineConfig, host: HostCallbacks) -> Self {
        Self {
            engine: build_engine(config, &host),
            scope: Scope::new(),
            functions: AST::empty(),
            host,
        }
    }

    fn evaluate(&mut self, code: &str) -> Result<Dynamic, ScriptError> {
        let ast = self
            .engine
            .compile_with_scope(&self.scope, code)
            .map_err(|e| ScriptError::Reported(e.to_string()))?;

        // Functions declared by earlier runs stay callable.
        let program = self.functions.merge(&ast);

        let value = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &program)
            .map_err(|e| {
                if is_fatal(&e) {
                    ScriptError::Fatal(e.to_string())
                } else {
                    ScriptError::Reported(e.to_string())
                }
            })?;

        self.functions = program.clone_functions_only();
        Ok(value)
    }
}

impl Runtime for RhaiRuntime {
    fn run(&mut self, code: &str, interactive: bool) -> Result<(), RuntimeFailure> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.evaluate(code)));

        match outcome {
            Ok(Ok(value)) => {
                if interactive && !value.is_unit() {
                    self.host.print(&value.to_string());
                }
                Ok(())
            }
            Ok(Err(ScriptError::Reported(message))) => {
                self.host.error(&format!("Error: {}", message));
                Ok(())
            }
            Ok(Err(ScriptError::Fatal(message))) => Err(RuntimeFailure::new(message)),
            Err(payload) => Err(RuntimeFailure::new(panic_message(payload.as_ref()))),
        }
    }

    fn reset(&mut self) {
        self.scope.clear();
        self.functions = AST::empty();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "engine panicked".to_string()
    }
}

/// Constructs [`RhaiRuntime`] handles sharing one engine configuration.
#[derive(Debug, Clone, Default)]
pub struct RhaiFactory {
    config: EngineConfig,
}

impl RhaiFactory {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }
}

impl RuntimeFactory for RhaiFactory {
    type Runtime = RhaiRuntime;

    fn construct(&self, host: HostCallbacks) -> RhaiRuntime {
        tracing::debug!("[Session] Constructing rhai runtime");
        RhaiRuntime::new(&self.config, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scratchpad_core::{OutputChannel, OutputEntry, Severity, VirtualFileSet};

    fn runtime() -> (RhaiRuntime, OutputChannel) {
        let output = OutputChannel::new();
        let host = HostCallbacks::new(output.clone(), VirtualFileSet::seeded("main.rhai"));
        let config = EngineConfig {
            max_operations: 10_000,
            max_call_levels: 8,
            ..EngineConfig::default()
        };
        (RhaiRuntime::new(&config, host), output)
    }

    #[test]
    fn test_interactive_echoes_final_value() {
        let (mut runtime, output) = runtime();
        runtime.run("40 + 2", true).unwrap();
        runtime.run("let quiet = 1;", true).unwrap();
        assert_eq!(output.entries(), vec![OutputEntry::new("42", Severity::Print)]);
    }

    #[test]
    fn test_batch_does_not_echo() {
        let (mut runtime, output) = runtime();
        runtime.run("40 + 2", false).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_variables_and_functions_persist_until_reset() {
        let (mut runtime, output) = runtime();
        runtime.run("let base = 20; fn twice(x) { x * 2 }", true).unwrap();
        runtime.run("print(twice(base) + 2);", true).unwrap();
        assert_eq!(output.entries()[0].text, "42");

        runtime.reset();
        runtime.run("print(base);", true).unwrap();
        runtime.run("twice(1)", true).unwrap();

        let entries = output.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].severity, Severity::Err);
        assert!(entries[1].text.starts_with("Error: Variable not found"));
        assert_eq!(entries[2].severity, Severity::Err);
        assert!(entries[2].text.contains("twice"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let (mut runtime, output) = runtime();
        assert!(runtime.run("let = ;", false).is_ok());
        let entry = &output.entries()[0];
        assert_eq!(entry.severity, Severity::Err);
        assert!(entry.text.starts_with("Error: "));
    }

    #[test]
    fn test_runaway_loop_is_a_failure() {
        let (mut runtime, _) = runtime();
        let failure = runtime.run("loop { }", false).unwrap_err();
        assert!(failure.message.contains("Too many operations"));
    }

    #[test]
    fn test_unbounded_recursion_is_a_failure() {
        let (mut runtime, _) = runtime();
        let result = runtime.run("fn down(n) { down(n + 1) } down(0);", true);
        assert!(result.is_err());
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "engine panicked");
    }
}
