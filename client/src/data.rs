use memoria_shared::Roster;

pub const ROSTER_URL: &str = "/tier_list.json";

/// Roster load progress, held in a signal for the whole session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RosterState {
    #[default]
    Loading,
    Ready(Roster),
    Failed(String),
}

impl RosterState {
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            Self::Ready(roster) => Some(roster),
            _ => None,
        }
    }
}

pub async fn fetch_roster() -> Result<Roster, String> {
    let resp = gloo_net::http::Request::get(ROSTER_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| format!("read error: {e}"))?;
    Roster::from_json(&body).map_err(|e| e.to_string())
}
