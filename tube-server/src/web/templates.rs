//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::DEFAULT_OPTION_LABEL;
use crate::map::StepView;
use crate::session::PageView;

/// Seconds between refreshes while the station directory is loading.
const LOADING_REFRESH_SECS: u32 = 2;

/// The route planner page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: PageView,
    pub default_label: &'static str,
    pub refresh_secs: u32,
}

impl IndexTemplate {
    /// Create the page for a session snapshot.
    pub fn new(view: PageView) -> Self {
        Self {
            view,
            default_label: DEFAULT_OPTION_LABEL,
            refresh_secs: LOADING_REFRESH_SECS,
        }
    }

    /// Whether the default entry is selected in the start dropdown.
    pub fn start_unselected(&self) -> bool {
        !self.view.start_options.iter().any(|o| o.selected)
    }

    /// Whether the default entry is selected in the end dropdown.
    pub fn end_unselected(&self) -> bool {
        !self.view.end_options.iter().any(|o| o.selected)
    }

    /// Whether the form can be submitted.
    pub fn can_plan(&self) -> bool {
        !self.view.loading && !self.view.start_options.is_empty()
    }

    /// Rows for the route's step list.
    pub fn step_rows(&self) -> Vec<StepRow> {
        self.view
            .route
            .as_ref()
            .map(|r| r.steps.iter().map(StepRow::from_step).collect())
            .unwrap_or_default()
    }
}

/// One line of the step list, e.g. "Victoria subway from Oxford Circus to Green Park, 2 stops".
pub fn step_summary(step: &StepView) -> String {
    let mut summary = match &step.line {
        Some(line) => format!("{} {}", line, step.mode.to_lowercase()),
        None => step.mode.clone(),
    };

    if let (Some(from), Some(to)) = (&step.from_stop, &step.to_stop) {
        summary.push_str(&format!(" from {from} to {to}"));
    }

    match step.num_stops {
        Some(1) => summary.push_str(", 1 stop"),
        Some(n) => summary.push_str(&format!(", {n} stops")),
        None => {}
    }

    summary
}

/// Step list row.
#[derive(Debug, Clone)]
pub struct StepRow {
    pub summary: String,
    pub instruction: String,
    pub duration: String,
    pub color: String,
    pub transit: bool,
}

impl StepRow {
    /// Create from a rendered step.
    pub fn from_step(step: &StepView) -> Self {
        Self {
            summary: step_summary(step),
            instruction: step.instruction.clone(),
            duration: step.duration.clone(),
            color: step.line_color.clone().unwrap_or_else(|| "#999999".into()),
            transit: step.is_transit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::RenderedRoute;
    use crate::report::{ErrorCategory, Notification};
    use crate::session::OptionView;

    fn step(line: Option<&str>, stops: Option<u32>) -> StepView {
        StepView {
            mode: if line.is_some() { "Subway" } else { "Walk" }.into(),
            instruction: "Subway towards Brixton".into(),
            duration: "4 mins".into(),
            line: line.map(String::from),
            line_color: line.map(|_| "#0098d4".into()),
            from_stop: line.map(|_| "Oxford Circus".into()),
            to_stop: line.map(|_| "Green Park".into()),
            num_stops: stops,
        }
    }

    fn view() -> PageView {
        PageView {
            loading: false,
            start_options: vec![
                OptionView {
                    value: "Green Park".into(),
                    selected: false,
                },
                OptionView {
                    value: "Oxford Circus".into(),
                    selected: true,
                },
            ],
            end_options: vec![
                OptionView {
                    value: "Green Park".into(),
                    selected: false,
                },
                OptionView {
                    value: "Oxford Circus".into(),
                    selected: false,
                },
            ],
            start_accessibility: "Accessibility: Step-free".into(),
            end_accessibility: String::new(),
            map_state: "ready",
            map_failed: false,
            map_visible: false,
            overlay_visible: true,
            route: None,
            notifications: vec![],
        }
    }

    #[test]
    fn step_summary_for_ride() {
        assert_eq!(
            step_summary(&step(Some("Victoria"), Some(1))),
            "Victoria subway from Oxford Circus to Green Park, 1 stop"
        );
        assert_eq!(
            step_summary(&step(Some("Victoria"), Some(3))),
            "Victoria subway from Oxford Circus to Green Park, 3 stops"
        );
    }

    #[test]
    fn step_summary_for_walk() {
        assert_eq!(step_summary(&step(None, None)), "Walk");
    }

    #[test]
    fn selection_helpers() {
        let page = IndexTemplate::new(view());
        assert!(!page.start_unselected());
        assert!(page.end_unselected());
        assert!(page.can_plan());

        let mut loading = view();
        loading.loading = true;
        assert!(!IndexTemplate::new(loading).can_plan());
    }

    #[test]
    fn renders_dropdowns_and_accessibility() {
        let html = IndexTemplate::new(view()).render().unwrap();

        assert!(html.contains(DEFAULT_OPTION_LABEL));
        assert!(html.contains(r#"<option value="Oxford Circus" selected>"#));
        assert!(html.contains("Accessibility: Step-free"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn loading_page_refreshes() {
        let mut loading = view();
        loading.loading = true;
        loading.start_options.clear();
        loading.end_options.clear();

        let html = IndexTemplate::new(loading).render().unwrap();
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(html.contains("Loading stations"));
    }

    #[test]
    fn renders_notifications_and_route() {
        let mut page = view();
        page.notifications.push(Notification {
            category: ErrorCategory::Validation,
            headline: ErrorCategory::Validation.headline(),
            detail: "Please select different stations for the start and end points.".into(),
        });
        page.map_visible = true;
        page.route = Some(RenderedRoute {
            origin: "Oxford Circus Station, London".into(),
            destination: "Green Park Station, London".into(),
            embed_url: None,
            summary: String::new(),
            departure: Some("10:02".into()),
            arrival: Some("10:08".into()),
            duration: Some("6 mins".into()),
            distance: None,
            fare: None,
            steps: vec![step(Some("Victoria"), Some(1))],
            warnings: vec![],
            copyrights: "Map data".into(),
            rendered_at: "10:00".into(),
        });

        let html = IndexTemplate::new(page).render().unwrap();
        assert!(html.contains("Please select different stations for the start and end points."));
        assert!(html.contains("Victoria subway from Oxford Circus to Green Park, 1 stop"));
        assert!(html.contains("6 mins"));
    }
}
