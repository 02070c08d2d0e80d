use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{EntityId, Outcome};

pub type OutcomeMap = BTreeMap<EntityId, Outcome>;

/// Body of `GET /randomize`: one randomly chosen outcome per entity.
pub type RandomizeResponse = OutcomeMap;

/// Body of `POST /simulate`.
///
/// `T` is whatever serializes as the entity → outcome object; the client
/// passes its store directly so the payload keeps the tracked order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest<T> {
    pub teams: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_teams: Option<Vec<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulateResponse {
    pub fn qualified(teams: Vec<String>) -> Self {
        Self {
            success: true,
            teams: Some(teams),
            raw_teams: None,
            error: None,
        }
    }

    pub fn failed(error: Option<String>) -> Self {
        Self {
            success: false,
            teams: None,
            raw_teams: None,
            error,
        }
    }

    /// `None` when the server claims success without a qualifying list.
    pub fn into_verdict(self) -> Option<SimulateVerdict> {
        match (self.success, self.teams) {
            (true, Some(teams)) => Some(SimulateVerdict::Qualified(teams)),
            (true, None) => None,
            (false, _) => Some(SimulateVerdict::Rejected(self.error)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulateVerdict {
    Qualified(Vec<String>),
    Rejected(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_response_tolerates_missing_optional_fields() {
        let parsed: SimulateResponse =
            serde_json::from_str(r#"{"success":false}"#).expect("parse");
        assert_eq!(parsed, SimulateResponse::failed(None));

        let parsed: SimulateResponse = serde_json::from_str(
            r#"{"success":true,"teams":["Georgia","Alabama"],"raw_teams":["uga","bama"]}"#,
        )
        .expect("parse");
        assert!(parsed.success);
        assert_eq!(
            parsed.teams,
            Some(vec!["Georgia".to_string(), "Alabama".to_string()])
        );
        assert_eq!(
            parsed.raw_teams,
            Some(vec![EntityId::from("uga"), EntityId::from("bama")])
        );
    }

    #[test]
    fn success_without_qualifier_list_has_no_verdict() {
        let parsed: SimulateResponse = serde_json::from_str(r#"{"success":true}"#).expect("parse");
        assert_eq!(parsed.teams, None);
        assert_eq!(parsed.into_verdict(), None);

        let parsed: SimulateResponse =
            serde_json::from_str(r#"{"success":true,"teams":[]}"#).expect("parse");
        assert_eq!(parsed.into_verdict(), Some(SimulateVerdict::Qualified(Vec::new())));

        let parsed: SimulateResponse =
            serde_json::from_str(r#"{"success":false,"error":"bad input"}"#).expect("parse");
        assert_eq!(
            parsed.into_verdict(),
            Some(SimulateVerdict::Rejected(Some("bad input".to_string())))
        );
    }

    #[test]
    fn simulate_request_nests_outcomes_under_teams() {
        let mut teams = OutcomeMap::new();
        teams.insert(EntityId::from("tamu"), Outcome::loss());
        let body = serde_json::to_value(SimulateRequest { teams }).expect("serialize");
        assert_eq!(body, serde_json::json!({ "teams": { "tamu": "loss" } }));
    }
}
