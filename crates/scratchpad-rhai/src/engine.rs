//! Engine construction and host function registration.

use rhai::{Engine, EvalAltResult, Position};
use scratchpad_core::config::EngineConfig;
use scratchpad_core::HostCallbacks;

/// Builds an engine with resource limits applied and the host callbacks
/// bound as script functions.
pub(crate) fn build_engine(config: &EngineConfig, host: &HostCallbacks) -> Engine {
    let mut engine = Engine::new();
    engine
        .set_max_operations(config.max_operations)
        .set_max_call_levels(config.max_call_levels)
        .set_max_string_size(config.max_string_size);

    let print_host = host.clone();
    engine.on_print(move |text| print_host.print(text));

    let debug_host = host.clone();
    engine.on_debug(move |text, _source, pos: Position| match pos.line() {
        Some(line) => debug_host.warn(&format!("[line {}] {}", line, text)),
        None => debug_host.warn(text),
    });

    let warn_host = host.clone();
    engine.register_fn("warn", move |text: &str| warn_host.warn(text));

    let error_host = host.clone();
    engine.register_fn("error", move |text: &str| error_host.error(text));

    let read_host = host.clone();
    engine.register_fn("readfile", move |name: &str| -> String { read_host.readfile(name) });

    let write_host = host.clone();
    engine.register_fn("writefile", move |name: &str, content: &str| {
        write_host.writefile(name, content)
    });

    engine
}

/// Whether an evaluation error means the engine itself gave up (resource
/// limits, termination) rather than the script being wrong.
pub(crate) fn is_fatal(err: &EvalAltResult) -> bool {
    match err {
        EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => is_fatal(inner),
        EvalAltResult::ErrorInModule(_, inner, _) => is_fatal(inner),
        EvalAltResult::ErrorTooManyOperations(_)
        | EvalAltResult::ErrorStackOverflow(_)
        | EvalAltResult::ErrorDataTooLarge(_, _)
        | EvalAltResult::ErrorTerminated(_, _) => true,
        _ => false,
    }
}
