use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WizardError;

/// The seven ordered sections of the placement profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProfileStep {
    PersonalInfo = 1,
    ContactDetails = 2,
    AddressDetails = 3,
    TenthStandard = 4,
    TwelfthStandard = 5,
    EngineeringDetails = 6,
    FinalVerification = 7,
}

impl ProfileStep {
    pub const ALL: [ProfileStep; 7] = [
        ProfileStep::PersonalInfo,
        ProfileStep::ContactDetails,
        ProfileStep::AddressDetails,
        ProfileStep::TenthStandard,
        ProfileStep::TwelfthStandard,
        ProfileStep::EngineeringDetails,
        ProfileStep::FinalVerification,
    ];

    pub const FIRST: ProfileStep = ProfileStep::PersonalInfo;
    pub const LAST: ProfileStep = ProfileStep::FinalVerification;

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|step| step.number() == number)
    }

    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Self::LAST)
    }

    pub fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }

    pub const fn title(self) -> &'static str {
        match self {
            ProfileStep::PersonalInfo => "Personal Information",
            ProfileStep::ContactDetails => "Contact & Family Details",
            ProfileStep::AddressDetails => "Address Information",
            ProfileStep::TenthStandard => "10th Standard Details",
            ProfileStep::TwelfthStandard => "12th/Diploma Details",
            ProfileStep::EngineeringDetails => "Engineering Details",
            ProfileStep::FinalVerification => "Final Verification",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ProfileStep::PersonalInfo => {
                "Tell us about yourself - basic personal details and identity"
            }
            ProfileStep::ContactDetails => "Your contact information and parent/guardian details",
            ProfileStep::AddressDetails => {
                "Where do you live? Current and permanent address details"
            }
            ProfileStep::TenthStandard => {
                "Your SSC/10th standard academic performance and documents"
            }
            ProfileStep::TwelfthStandard => {
                "Your HSC/12th standard or diploma academic performance"
            }
            ProfileStep::EngineeringDetails => {
                "Your current engineering college and semester performance"
            }
            ProfileStep::FinalVerification => {
                "Document verification and complete your placement profile"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
    pub parent_name: String,
    pub parent_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDetails {
    pub current_address: String,
    #[serde(default)]
    pub permanent_address: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenthDetails {
    pub board: String,
    pub school_name: String,
    pub percentage: f64,
    pub passing_year: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreUniversityTrack {
    TwelfthStandard,
    Diploma,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwelfthDetails {
    pub track: PreUniversityTrack,
    pub institution: String,
    pub board: String,
    pub percentage: f64,
    pub passing_year: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineeringDetails {
    pub usn: String,
    pub branch: String,
    pub batch: String,
    pub current_semester: u8,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub final_cgpa: Option<f64>,
    #[serde(default)]
    pub active_backlogs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycDetails {
    pub id_document_number: String,
    #[serde(default)]
    pub documents_verified: bool,
    #[serde(default)]
    pub declaration_accepted: bool,
}

/// Parsed payload of one wizard step.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSection {
    PersonalInfo(PersonalInfo),
    ContactDetails(ContactDetails),
    AddressDetails(AddressDetails),
    TenthStandard(TenthDetails),
    TwelfthStandard(TwelfthDetails),
    EngineeringDetails(EngineeringDetails),
    FinalVerification(KycDetails),
}

impl ProfileSection {
    /// Parse and validate the JSON body submitted for `step`.
    pub fn parse(step: ProfileStep, payload: Value) -> Result<Self, WizardError> {
        let invalid = |err: serde_json::Error| WizardError::InvalidSection {
            step: step.number(),
            message: err.to_string(),
        };

        let section = match step {
            ProfileStep::PersonalInfo => {
                Self::PersonalInfo(serde_json::from_value(payload).map_err(invalid)?)
            }
            ProfileStep::ContactDetails => {
                Self::ContactDetails(serde_json::from_value(payload).map_err(invalid)?)
            }
            ProfileStep::AddressDetails => {
                Self::AddressDetails(serde_json::from_value(payload).map_err(invalid)?)
            }
            ProfileStep::TenthStandard => {
                Self::TenthStandard(serde_json::from_value(payload).map_err(invalid)?)
            }
            ProfileStep::TwelfthStandard => {
                Self::TwelfthStandard(serde_json::from_value(payload).map_err(invalid)?)
            }
            ProfileStep::EngineeringDetails => {
                Self::EngineeringDetails(serde_json::from_value(payload).map_err(invalid)?)
            }
            ProfileStep::FinalVerification => {
                Self::FinalVerification(serde_json::from_value(payload).map_err(invalid)?)
            }
        };

        section.validate()?;
        Ok(section)
    }

    pub fn step(&self) -> ProfileStep {
        match self {
            Self::PersonalInfo(_) => ProfileStep::PersonalInfo,
            Self::ContactDetails(_) => ProfileStep::ContactDetails,
            Self::AddressDetails(_) => ProfileStep::AddressDetails,
            Self::TenthStandard(_) => ProfileStep::TenthStandard,
            Self::TwelfthStandard(_) => ProfileStep::TwelfthStandard,
            Self::EngineeringDetails(_) => ProfileStep::EngineeringDetails,
            Self::FinalVerification(_) => ProfileStep::FinalVerification,
        }
    }

    fn validate(&self) -> Result<(), WizardError> {
        let mut check = SectionCheck::new(self.step());
        match self {
            Self::PersonalInfo(info) => {
                check.required("firstName", &info.first_name);
                check.required("lastName", &info.last_name);
            }
            Self::ContactDetails(contact) => {
                check.required("phone", &contact.phone);
                check.required("email", &contact.email);
                check.required("parentName", &contact.parent_name);
                check.required("parentPhone", &contact.parent_phone);
            }
            Self::AddressDetails(address) => {
                check.required("currentAddress", &address.current_address);
                check.required("city", &address.city);
                check.required("state", &address.state);
                check.required("pincode", &address.pincode);
            }
            Self::TenthStandard(tenth) => {
                check.required("board", &tenth.board);
                check.required("schoolName", &tenth.school_name);
                check.within("percentage", tenth.percentage, 0.0, 100.0);
            }
            Self::TwelfthStandard(twelfth) => {
                check.required("institution", &twelfth.institution);
                check.required("board", &twelfth.board);
                check.within("percentage", twelfth.percentage, 0.0, 100.0);
            }
            Self::EngineeringDetails(engineering) => {
                check.required("usn", &engineering.usn);
                check.required("branch", &engineering.branch);
                check.required("batch", &engineering.batch);
                check.within(
                    "currentSemester",
                    f64::from(engineering.current_semester),
                    1.0,
                    8.0,
                );
                if let Some(cgpa) = engineering.cgpa {
                    check.within("cgpa", cgpa, 0.0, 10.0);
                }
                if let Some(final_cgpa) = engineering.final_cgpa {
                    check.within("finalCgpa", final_cgpa, 0.0, 10.0);
                }
            }
            Self::FinalVerification(kyc) => {
                check.required("idDocumentNumber", &kyc.id_document_number);
                if !kyc.declaration_accepted {
                    check.fail("declarationAccepted must be accepted");
                }
            }
        }
        check.finish()
    }
}

struct SectionCheck {
    step: ProfileStep,
    problems: Vec<String>,
}

impl SectionCheck {
    fn new(step: ProfileStep) -> Self {
        Self {
            step,
            problems: Vec::new(),
        }
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.problems.push(format!("{field} is required"));
        }
    }

    fn within(&mut self, field: &str, value: f64, min: f64, max: f64) {
        if !(min..=max).contains(&value) {
            self.problems
                .push(format!("{field} must be between {min} and {max}"));
        }
    }

    fn fail(&mut self, problem: &str) {
        self.problems.push(problem.to_string());
    }

    fn finish(self) -> Result<(), WizardError> {
        if self.problems.is_empty() {
            return Ok(());
        }
        Err(WizardError::InvalidSection {
            step: self.step.number(),
            message: self.problems.join("; "),
        })
    }
}
