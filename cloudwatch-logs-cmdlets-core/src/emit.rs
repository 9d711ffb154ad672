//! Output sink for emitted objects

use serde_json::Value;

/// Receives projected objects as soon as each page is processed
pub trait Emitter: Send {
    fn emit(&mut self, value: Value) -> std::io::Result<()>;
}

impl Emitter for Vec<Value> {
    fn emit(&mut self, value: Value) -> std::io::Result<()> {
        self.push(value);
        Ok(())
    }
}
