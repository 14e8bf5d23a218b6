pub mod analysis;
pub mod candidate;
pub mod lenient;

pub use analysis::{
    AnalysisResult, CertificationEntry, ContactInfo, EducationEntry, ProjectEntry, SkillCategory,
};
pub use candidate::CandidateFile;
