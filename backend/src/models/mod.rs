pub mod nota;
pub mod tarefa;

pub use nota::{NewNotaRequest, Nota};
pub use tarefa::{StatusUpdateRequest, Tarefa, TarefaUpdate};
