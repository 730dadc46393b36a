use crate::influencer::Influencer;
use crate::selection::Selection;

/// Client-side state shared by the workflow handlers for one session.
///
/// Handlers receive it explicitly; nothing here is global.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub campaign_id: Option<String>,
    /// In server response order.
    pub influencers: Vec<Influencer>,
    pub selection: Selection,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the influencer list wholesale and drops selected ids that
    /// are no longer listed.
    pub fn replace_influencers(&mut self, influencers: Vec<Influencer>) {
        self.influencers = influencers;
        let influencers = &self.influencers;
        self.selection
            .retain_known(|id| influencers.iter().any(|inf| inf.id == id));
    }

    #[must_use]
    pub fn influencer(&self, id: &str) -> Option<&Influencer> {
        self.influencers.iter().find(|inf| inf.id == id)
    }
}
