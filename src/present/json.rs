//! JSON presenter.

use serde_json::{Map, Value};

use super::{PresentError, Presenter, View};
use crate::models::SubmissionsView;

/// Collects presented views into a single JSON object keyed by view name.
#[derive(Debug, Default)]
pub struct JsonPresenter {
    views: Map<String, Value>,
}

impl JsonPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.views)
    }
}

impl Presenter for JsonPresenter {
    fn present(&mut self, view: &View<'_>) -> Result<(), PresentError> {
        let value = match *view {
            View::Overview(v) => serde_json::to_value(v)?,
            View::ProblemAcceptance(v) => serde_json::to_value(v)?,
            View::ResultDistribution(v) | View::LanguageDistribution(v) => {
                serde_json::to_value(v)?
            }
            View::Leaderboard(v) => serde_json::to_value(v)?,
            View::LanguageSuccess(v) => serde_json::to_value(v)?,
            View::ErrorBreakdown(v) => serde_json::to_value(v)?,
            View::TopErrorUsers(v) => serde_json::to_value(v)?,
            View::Attempts(v) => serde_json::to_value(v)?,
            View::Matrix(v) => serde_json::to_value(v)?,
            View::ScoreHistogram(v) => serde_json::to_value(v)?,
            View::Submissions(table) => serde_json::to_value(SubmissionsView::from_table(table))?,
        };

        self.views.insert(view.name().to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::scenario;
    use crate::config::AnalysisConfig;
    use crate::models::DashboardViews;
    use crate::present::present_dashboard;

    #[test]
    fn test_json_presenter_dashboard() {
        let views = DashboardViews::compute(&scenario(), &AnalysisConfig::default());
        let mut presenter = JsonPresenter::new();
        present_dashboard(&mut presenter, &views).unwrap();

        let json = presenter.into_value();
        assert_eq!(json["overview"]["submission_count"], 3);
        assert_eq!(json["problems"][0]["acceptance_rate"], 50.0);
        assert_eq!(json["leaderboard"][0]["user_id"], "u1");
        assert_eq!(json["matrix"]["cells"][0][0], 1);
        assert_eq!(json.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_json_presenter_submissions() {
        let table = scenario();
        let mut presenter = JsonPresenter::new();
        presenter.present(&View::Submissions(&table)).unwrap();

        let json = presenter.into_value();
        assert_eq!(json["submissions"]["headers"][1], "Team/User ID");
        assert_eq!(json["submissions"]["rows"].as_array().unwrap().len(), 3);
    }
}
