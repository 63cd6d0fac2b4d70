/// Terminal interaction: line prompts and the filter questions.
pub mod console;
pub mod filters;
