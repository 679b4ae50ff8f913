//! Effects - side effects declared by the reducer

use crate::cities::CityDraft;

/// Requests to the outside world; each completes with a result action
#[derive(Debug, Clone)]
pub enum Effect {
    /// `GET /cities`
    FetchCities,
    /// `GET /cities/{id}`
    FetchCity { id: String },
    /// `POST /cities`; `request` is unique per submit
    CreateCity { request: u64, draft: CityDraft },
    /// `DELETE /cities/{id}`
    DeleteCity { id: String },
    /// Look up the place under a map point
    ReverseGeocode { lat: f64, lng: f64 },
}

impl Effect {
    /// Key of the task running this effect.
    ///
    /// A new task under a key still in flight aborts the old one, so lookups
    /// share a key and writes never do.
    pub fn task_key(&self) -> String {
        match self {
            Effect::FetchCities => "cities".into(),
            Effect::FetchCity { .. } => "city_get".into(),
            Effect::CreateCity { request, .. } => format!("city_create_{request}"),
            Effect::DeleteCity { id } => format!("city_delete_{id}"),
            Effect::ReverseGeocode { .. } => "geocode".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::Position;

    fn draft() -> CityDraft {
        CityDraft {
            city_name: "Lisbon".into(),
            country: "Portugal".into(),
            emoji: String::new(),
            date: "2024-01-01T00:00:00.000Z".into(),
            notes: String::new(),
            position: Position::new(38.72, -9.14),
        }
    }

    #[test]
    fn test_creates_never_share_a_task() {
        let first = Effect::CreateCity { request: 1, draft: draft() };
        let second = Effect::CreateCity { request: 2, draft: draft() };
        assert_ne!(first.task_key(), second.task_key());
    }

    #[test]
    fn test_lookups_share_a_task() {
        let a = Effect::ReverseGeocode { lat: 1.0, lng: 2.0 };
        let b = Effect::ReverseGeocode { lat: 3.0, lng: 4.0 };
        assert_eq!(a.task_key(), b.task_key());
        assert_eq!(
            Effect::FetchCity { id: "1".into() }.task_key(),
            Effect::FetchCity { id: "2".into() }.task_key()
        );
        assert_ne!(
            Effect::DeleteCity { id: "1".into() }.task_key(),
            Effect::DeleteCity { id: "2".into() }.task_key()
        );
    }
}
