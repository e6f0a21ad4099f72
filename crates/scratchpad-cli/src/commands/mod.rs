pub mod files;
pub mod repl;
pub mod run;
