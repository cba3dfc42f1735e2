mod jsonl_sink;

pub use jsonl_sink::JsonlHistorySink;
