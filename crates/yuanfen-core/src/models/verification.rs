/// Progress through the identity check: ID photo first, then a selfie, then
/// the review. Advancing requires the capture for the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationStep {
    #[default]
    IdPhoto,
    Selfie,
    Processing,
    Verified,
}

#[derive(Debug, Clone, Default)]
pub struct VerificationFlow {
    step: VerificationStep,
    id_image: Option<String>,
    selfie_image: Option<String>,
}

impl VerificationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> VerificationStep {
        self.step
    }

    pub fn is_verified(&self) -> bool {
        self.step == VerificationStep::Verified
    }

    /// Attach (or replace) the ID-card photo.
    pub fn attach_id_photo(&mut self, image: impl Into<String>) {
        self.id_image = Some(image.into());
    }

    /// Attach (or replace) the selfie.
    pub fn attach_selfie(&mut self, image: impl Into<String>) {
        self.selfie_image = Some(image.into());
    }

    /// Move to the next step. Returns false if the required capture is
    /// missing or the flow is already under review.
    pub fn advance(&mut self) -> bool {
        match self.step {
            VerificationStep::IdPhoto => {
                if self.id_image.is_none() {
                    tracing::debug!("verification: advance without ID photo, ignoring");
                    return false;
                }
                self.step = VerificationStep::Selfie;
                true
            }
            VerificationStep::Selfie => {
                if self.selfie_image.is_none() {
                    tracing::debug!("verification: advance without selfie, ignoring");
                    return false;
                }
                self.step = VerificationStep::Processing;
                true
            }
            VerificationStep::Processing | VerificationStep::Verified => false,
        }
    }

    /// The external review approved. Only meaningful while processing.
    pub fn complete_review(&mut self) -> bool {
        if self.step != VerificationStep::Processing {
            tracing::debug!(step = ?self.step, "verification: review completion out of order, ignoring");
            return false;
        }
        self.step = VerificationStep::Verified;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_requires_captures() {
        let mut flow = VerificationFlow::new();
        assert_eq!(flow.step(), VerificationStep::IdPhoto);

        // No ID photo yet
        assert!(!flow.advance());
        flow.attach_id_photo("id.jpg");
        assert!(flow.advance());
        assert_eq!(flow.step(), VerificationStep::Selfie);

        // No selfie yet
        assert!(!flow.advance());
        flow.attach_selfie("selfie.jpg");
        assert!(flow.advance());
        assert_eq!(flow.step(), VerificationStep::Processing);
    }

    #[test]
    fn test_review_completes_only_while_processing() {
        let mut flow = VerificationFlow::new();
        assert!(!flow.complete_review());

        flow.attach_id_photo("id.jpg");
        flow.advance();
        flow.attach_selfie("selfie.jpg");
        flow.advance();

        assert!(flow.complete_review());
        assert!(flow.is_verified());

        // Terminal state: nothing advances further
        assert!(!flow.advance());
        assert!(!flow.complete_review());
    }

    #[test]
    fn test_recapture_replaces_image() {
        let mut flow = VerificationFlow::new();
        flow.attach_id_photo("blurry.jpg");
        flow.attach_id_photo("sharp.jpg");
        assert!(flow.advance());
    }
}
