pub mod c_emitter;

pub use c_emitter::{emit, emit_with, CEmitter, EmitConfig};
