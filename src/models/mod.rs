pub mod assembled;
pub mod block;
pub mod loaders;
pub mod question;

pub use assembled::{AssembledExam, AssemblyParams, AssemblyStats, ExamStats};
pub use block::Block;
pub use loaders::{load_exam_catalog, load_exam_questions, TomlExamRepository};
pub use question::{Exam, ExamMeta, Question};
