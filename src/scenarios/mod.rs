pub mod student;

pub use student::StudentNetwork;
