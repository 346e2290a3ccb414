use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::steps::{
    AddressDetails, ContactDetails, EngineeringDetails, KycDetails, PersonalInfo, ProfileSection,
    ProfileStep, TenthDetails, TwelfthDetails,
};
use super::WizardError;
use crate::portal::domain::{StudentProfile, Tier, UserId};

/// In-progress profile form for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub user_id: UserId,
    pub current_step: ProfileStep,
    pub completed_steps: BTreeSet<ProfileStep>,
    pub is_complete: bool,
    pub personal_info: Option<PersonalInfo>,
    pub contact_details: Option<ContactDetails>,
    pub address_details: Option<AddressDetails>,
    pub tenth_details: Option<TenthDetails>,
    pub twelfth_details: Option<TwelfthDetails>,
    pub engineering_details: Option<EngineeringDetails>,
    pub kyc_details: Option<KycDetails>,
}

/// Wizard state as presented to the student.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub current_step: u8,
    pub total_steps: u8,
    pub progress: u8,
    pub is_complete: bool,
    pub steps: Vec<StepSummary>,
    pub draft: ProfileDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub is_complete: bool,
    pub is_current: bool,
}

impl ProfileDraft {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            current_step: ProfileStep::FIRST,
            completed_steps: BTreeSet::new(),
            is_complete: false,
            personal_info: None,
            contact_details: None,
            address_details: None,
            tenth_details: None,
            twelfth_details: None,
            engineering_details: None,
            kyc_details: None,
        }
    }

    /// Record a validated section and move to the following step.
    ///
    /// Final verification is accepted only once every earlier step is saved.
    pub fn apply(&mut self, section: ProfileSection) -> Result<(), WizardError> {
        let step = section.step();
        if step == ProfileStep::LAST {
            let missing = self.missing_before_final();
            if !missing.is_empty() {
                return Err(WizardError::IncompleteSteps(missing));
            }
        }

        match section {
            ProfileSection::PersonalInfo(info) => self.personal_info = Some(info),
            ProfileSection::ContactDetails(contact) => self.contact_details = Some(contact),
            ProfileSection::AddressDetails(address) => self.address_details = Some(address),
            ProfileSection::TenthStandard(tenth) => self.tenth_details = Some(tenth),
            ProfileSection::TwelfthStandard(twelfth) => self.twelfth_details = Some(twelfth),
            ProfileSection::EngineeringDetails(engineering) => {
                self.engineering_details = Some(engineering)
            }
            ProfileSection::FinalVerification(kyc) => self.kyc_details = Some(kyc),
        }

        self.completed_steps.insert(step);
        self.current_step = step.next();
        if step == ProfileStep::LAST {
            self.is_complete = true;
        }
        Ok(())
    }

    pub fn go_back(&mut self) {
        self.current_step = self.current_step.previous();
    }

    pub fn jump_to(&mut self, step: ProfileStep) {
        self.current_step = step;
    }

    /// Share of the form reached, rounded to a whole percent.
    pub fn progress(&self) -> u8 {
        let total = f64::from(ProfileStep::LAST.number());
        let current = f64::from(self.current_step.number());
        (current / total * 100.0).round() as u8
    }

    pub fn missing_before_final(&self) -> Vec<u8> {
        ProfileStep::ALL
            .iter()
            .filter(|step| **step != ProfileStep::LAST && !self.completed_steps.contains(step))
            .map(|step| step.number())
            .collect()
    }

    /// Academic profile used by eligibility checks, once engineering details exist.
    pub fn to_student_profile(&self, placement_tier: Option<Tier>) -> Option<StudentProfile> {
        let engineering = self.engineering_details.as_ref()?;
        Some(StudentProfile {
            user_id: self.user_id.clone(),
            branch: Some(engineering.branch.trim().to_string()),
            batch: Some(engineering.batch.trim().to_string()),
            final_cgpa: engineering.final_cgpa,
            cgpa: engineering.cgpa,
            active_backlogs: Some(engineering.active_backlogs),
            has_backlogs: Some(if engineering.active_backlogs > 0 { "yes" } else { "no" }.to_string()),
            placement_tier,
        })
    }

    pub fn view(&self) -> WizardView {
        let steps = ProfileStep::ALL
            .iter()
            .map(|step| StepSummary {
                id: step.number(),
                title: step.title(),
                description: step.description(),
                is_complete: self.completed_steps.contains(step),
                is_current: *step == self.current_step,
            })
            .collect();

        WizardView {
            current_step: self.current_step.number(),
            total_steps: ProfileStep::LAST.number(),
            progress: self.progress(),
            is_complete: self.is_complete,
            steps,
            draft: self.clone(),
        }
    }
}
