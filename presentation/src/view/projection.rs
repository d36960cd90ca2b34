//! View projection
//!
//! Turns a [`DeliberationState`] into render instructions for one of the
//! three view modes. Projection never fetches and is deterministic: the
//! same state and mode always give an equal [`Projection`].

use super::card::Card;
use council_domain::core::string::slugify_whitespace;
use council_domain::{ChairmanPolicy, DeliberationState, ParticipantGroups, Stage, ViewMode};
use serde::Serialize;

/// Render instructions for the active view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Projection {
    Sequential(SequentialView),
    Comparison(ComparisonView),
    Tabbed(TabbedView),
}

impl Projection {
    pub fn mode(&self) -> ViewMode {
        match self {
            Projection::Sequential(_) => ViewMode::Sequential,
            Projection::Comparison(_) => ViewMode::Comparison,
            Projection::Tabbed(_) => ViewMode::Tabbed,
        }
    }

    /// Total number of cards across the projection
    pub fn card_count(&self) -> usize {
        match self {
            Projection::Sequential(v) => {
                v.opinions.len() + v.reviews.len() + usize::from(v.synthesis.is_some())
            }
            Projection::Comparison(v) => v.grid.len(),
            Projection::Tabbed(v) => v.panels.iter().map(|p| p.cards.len()).sum(),
        }
    }
}

/// Three independent lists in stored order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SequentialView {
    pub opinions: Vec<Card>,
    pub reviews: Vec<Card>,
    pub synthesis: Option<Card>,
}

impl SequentialView {
    /// Cards of one stage's section
    pub fn section(&self, stage: Stage) -> &[Card] {
        match stage {
            Stage::Opinions => &self.opinions,
            Stage::Review => &self.reviews,
            Stage::Synthesis => self.synthesis.as_slice(),
        }
    }
}

/// Stage 1 answers side by side
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonView {
    pub grid: Vec<Card>,
}

/// Tab header for one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    /// Color of the participant's first record
    pub color: String,
    pub active: bool,
}

/// Content panel for one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Participant label of the matching tab
    pub label: String,
    /// `tab-` + label with whitespace runs replaced by `-`. Not unique:
    /// "Agent One" and "Agent-One" share an id.
    pub id: String,
    pub cards: Vec<Card>,
    pub active: bool,
}

/// One tab and one panel per participant, first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabbedView {
    pub tabs: Vec<Tab>,
    pub panels: Vec<Panel>,
}

impl TabbedView {
    /// Activate by display label.
    ///
    /// The tab and the panel whose label equals `label` become active;
    /// everything else is deactivated.
    pub fn activate(&mut self, label: &str) {
        for tab in &mut self.tabs {
            tab.active = tab.label == label;
        }
        for panel in &mut self.panels {
            panel.active = panel.label == label;
        }
    }

    pub fn has_tab(&self, label: &str) -> bool {
        self.tabs.iter().any(|t| t.label == label)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.active)
    }

    pub fn active_panel(&self) -> Option<&Panel> {
        self.panels.iter().find(|p| p.active)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.label.as_str())
    }
}

/// Panel id for a participant label
pub fn panel_id(label: &str) -> String {
    format!("tab-{}", slugify_whitespace(label))
}

/// Projects deliberation state into view modes
pub struct ViewProjector;

impl ViewProjector {
    pub fn project(state: &DeliberationState, mode: ViewMode, policy: ChairmanPolicy) -> Projection {
        match mode {
            ViewMode::Sequential => Projection::Sequential(Self::sequential(state)),
            ViewMode::Comparison => Projection::Comparison(Self::comparison(state)),
            ViewMode::Tabbed => Projection::Tabbed(Self::tabbed(state, policy)),
        }
    }

    pub fn sequential(state: &DeliberationState) -> SequentialView {
        SequentialView {
            opinions: Self::opinion_cards(state),
            reviews: state
                .stage2()
                .iter()
                .enumerate()
                .map(|(i, r)| Card::review(r, i))
                .collect(),
            synthesis: state.stage3().map(Card::synthesis),
        }
    }

    /// Stage 2 and 3 are not part of the comparison grid
    pub fn comparison(state: &DeliberationState) -> ComparisonView {
        ComparisonView {
            grid: Self::opinion_cards(state),
        }
    }

    pub fn tabbed(state: &DeliberationState, policy: ChairmanPolicy) -> TabbedView {
        let groups = ParticipantGroups::group(state, policy);
        let mut view = TabbedView::default();

        for (position, (participant, records)) in groups.iter().enumerate() {
            let label = participant.as_str().to_string();
            let color = records
                .first()
                .map(|r| r.meta().color.clone())
                .unwrap_or_default();
            let first = position == 0;

            view.panels.push(Panel {
                label: label.clone(),
                id: panel_id(&label),
                cards: records
                    .iter()
                    .enumerate()
                    .map(|(i, r)| Card::from_record(r, i))
                    .collect(),
                active: first,
            });
            view.tabs.push(Tab {
                label,
                color,
                active: first,
            });
        }

        view
    }

    fn opinion_cards(state: &DeliberationState) -> Vec<Card> {
        state
            .stage1()
            .iter()
            .enumerate()
            .map(|(i, r)| Card::opinion(r, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::card::CardKind;
    use council_domain::{
        OpinionRecord, ParticipantId, Query, RecordMeta, ReviewRecord, SynthesisRecord,
    };

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s).unwrap()
    }

    /// The "What is 2+2?" deliberation, fully committed
    fn two_plus_two() -> DeliberationState {
        let mut state = DeliberationState::for_query(Query::parse("What is 2+2?").unwrap());
        state
            .commit_opinions(vec![OpinionRecord::new(pid("Alpha"), "4").with_meta(
                RecordMeta::default()
                    .with_color("#ff6b6b")
                    .with_tokens(3)
                    .with_latency(0.5),
            )])
            .unwrap();
        state
            .commit_reviews(vec![ReviewRecord::new(pid("Beta"), "Correct").with_meta(
                RecordMeta::default()
                    .with_color("#4ecdc4")
                    .with_tokens(2)
                    .with_latency(0.3),
            )])
            .unwrap();
        state
            .commit_synthesis(
                SynthesisRecord::new(pid("Chair"), "The answer is 4.").with_meta(
                    RecordMeta::default()
                        .with_color("#ffe66d")
                        .with_tokens(5)
                        .with_latency(0.4),
                ),
            )
            .unwrap();
        state
    }

    #[test]
    fn test_sequential_scenario() {
        let view = ViewProjector::sequential(&two_plus_two());
        assert_eq!(view.opinions.len(), 1);
        assert_eq!(view.reviews.len(), 1);
        assert_eq!(view.opinions[0].body, "4");
        assert_eq!(view.reviews[0].body, "Correct");
        assert_eq!(view.synthesis.as_ref().unwrap().body, "The answer is 4.");
        assert_eq!(view.section(Stage::Synthesis).len(), 1);
    }

    #[test]
    fn test_tabbed_scenario() {
        let view = ViewProjector::tabbed(&two_plus_two(), ChairmanPolicy::Replace);
        assert_eq!(view.labels().collect::<Vec<_>>(), vec!["Alpha", "Beta", "Chair"]);
        assert_eq!(view.active_tab().unwrap().label, "Alpha");
        assert_eq!(view.active_panel().unwrap().id, "tab-Alpha");
        assert_eq!(view.tabs[2].color, "#ffe66d");
        assert_eq!(view.panels[1].cards[0].kind, CardKind::Review);
        assert_eq!(view.panels[2].cards[0].kind, CardKind::Synthesis);
    }

    #[test]
    fn test_comparison_only_has_opinions() {
        let view = ViewProjector::comparison(&two_plus_two());
        assert_eq!(view.grid.len(), 1);
        assert!(view.grid.iter().all(|c| c.kind == CardKind::Opinion));

        let empty = ViewProjector::comparison(&DeliberationState::default());
        assert!(empty.grid.is_empty());
    }

    #[test]
    fn test_partial_state_projects() {
        let mut state = DeliberationState::for_query(Query::parse("q").unwrap());
        state
            .commit_opinions(vec![
                OpinionRecord::new(pid("A"), "a"),
                OpinionRecord::new(pid("B"), "b"),
            ])
            .unwrap();

        for mode in ViewMode::ALL {
            let projection = ViewProjector::project(&state, mode, ChairmanPolicy::Replace);
            assert_eq!(projection.mode(), mode);
            assert_eq!(projection.card_count(), 2);
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let state = two_plus_two();
        for mode in [
            ViewMode::Tabbed,
            ViewMode::Sequential,
            ViewMode::Comparison,
            ViewMode::Tabbed,
        ] {
            assert_eq!(
                ViewProjector::project(&state, mode, ChairmanPolicy::Replace),
                ViewProjector::project(&state, mode, ChairmanPolicy::Replace)
            );
        }
    }

    #[test]
    fn test_activate_by_label() {
        let mut view = ViewProjector::tabbed(&two_plus_two(), ChairmanPolicy::Replace);
        view.activate("Chair");

        assert_eq!(view.tabs.iter().filter(|t| t.active).count(), 1);
        assert_eq!(view.active_tab().unwrap().label, "Chair");
        assert_eq!(view.active_panel().unwrap().id, "tab-Chair");
    }

    #[test]
    fn test_activate_with_colliding_panel_ids() {
        let mut state = DeliberationState::for_query(Query::parse("q").unwrap());
        state
            .commit_opinions(vec![
                OpinionRecord::new(pid("Agent One"), "first"),
                OpinionRecord::new(pid("Agent-One"), "second"),
            ])
            .unwrap();

        let mut view = ViewProjector::tabbed(&state, ChairmanPolicy::Replace);
        assert_eq!(view.panels[0].id, view.panels[1].id);

        view.activate("Agent-One");
        assert_eq!(view.tabs.iter().filter(|t| t.active).count(), 1);
        assert_eq!(view.panels.iter().filter(|p| p.active).count(), 1);
        let panel = view.active_panel().unwrap();
        assert_eq!(panel.label, "Agent-One");
        assert_eq!(panel.cards[0].body, "second");
    }

    #[test]
    fn test_panel_id_collapses_whitespace() {
        assert_eq!(panel_id("Agent  One"), "tab-Agent-One");
        assert_eq!(panel_id("Alpha"), "tab-Alpha");
    }

    #[test]
    fn test_chairman_collision_in_tabs() {
        let mut state = DeliberationState::for_query(Query::parse("q").unwrap());
        state
            .commit_opinions(vec![OpinionRecord::new(pid("X"), "a")])
            .unwrap();
        state.commit_reviews(vec![]).unwrap();
        state
            .commit_synthesis(SynthesisRecord::new(pid("X"), "z"))
            .unwrap();

        let view = ViewProjector::tabbed(&state, ChairmanPolicy::Replace);
        assert_eq!(view.panels.len(), 1);
        assert_eq!(view.panels[0].cards.len(), 1);
        assert_eq!(view.panels[0].cards[0].body, "z");

        let view = ViewProjector::tabbed(&state, ChairmanPolicy::Append);
        assert_eq!(view.panels[0].cards.len(), 2);
    }

    #[test]
    fn test_serializes_with_mode_tag() {
        let projection =
            ViewProjector::project(&two_plus_two(), ViewMode::Comparison, ChairmanPolicy::Replace);
        let json = serde_json::to_value(&projection).unwrap();
        assert_eq!(json["mode"], "comparison");
        assert_eq!(json["grid"][0]["participant"], "Alpha");
    }
}
