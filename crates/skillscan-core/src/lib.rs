pub mod employee;
pub mod error;
pub mod extract;
pub mod seed;
pub mod skill;
pub mod storage;

pub use employee::{CvDocument, CvDocumentSummary, Employee, EmployeeDetails, EmployeeSummary};
pub use error::{Error, Result};
pub use extract::{
    extract_and_save, ExtractionOutcome, ExtractionRequest, SkillExtractor, TokenMatcher,
    TokenSets, Tokenizer,
};
pub use seed::seed_default_skills;
pub use skill::Skill;
pub use storage::Storage;
