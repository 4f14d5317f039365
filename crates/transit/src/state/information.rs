use model::information::{MaintenanceNotice, SafetyTip, Tariff};
use serde::Serialize;
use tokio::sync::watch;

use crate::information;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationSnapshot {
    pub tariffs: Vec<Tariff>,
    pub notices: Vec<MaintenanceNotice>,
    pub tips: Vec<SafetyTip>,
}

pub struct InformationState {
    state: watch::Sender<InformationSnapshot>,
}

impl InformationState {
    pub fn subscribe(&self) -> watch::Receiver<InformationSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> InformationSnapshot {
        self.state.borrow().clone()
    }

    pub fn set_tariffs(&self, tariffs: Vec<Tariff>) {
        self.state.send_modify(|state| state.tariffs = tariffs);
    }

    pub fn set_notices(&self, notices: Vec<MaintenanceNotice>) {
        self.state.send_modify(|state| state.notices = notices);
    }

    pub fn set_tips(&self, tips: Vec<SafetyTip>) {
        self.state.send_modify(|state| state.tips = tips);
    }
}

/// Starts with the published fares, notices and safety tips.
impl Default for InformationState {
    fn default() -> Self {
        let (state, _) = watch::channel(InformationSnapshot {
            tariffs: information::tariffs(),
            notices: information::maintenance_notices(),
            tips: information::safety_tips(),
        });
        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_notices_notifies() {
        let state = InformationState::default();
        let mut receiver = state.subscribe();
        assert_eq!(state.snapshot().notices.len(), 2);

        state.set_notices(Vec::new());
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().notices.is_empty());
        assert_eq!(state.snapshot().tariffs.len(), 5);
    }
}
