//! Side-by-side comparison of up to three models as radar-chart series.
//!
//! The axis set is the order-preserving union of characteristic names over
//! every model whose metrics loaded. A model that lacks a characteristic
//! plots at exactly 0 on that axis. Models whose metrics failed to load are
//! left out of the series and reported in [`Comparison::failures`].

use lords_core::{AiModel, ModelId, ModelMetric};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::guard::{ViewGuard, ViewTicket};

/// Most models a comparison holds at once
pub const MAX_COMPARED: usize = 3;

const CHART_MIN: f64 = 0.0;
const CHART_MAX: f64 = 100.0;

/// `"tiempo_inferencia"` becomes `"Tiempo Inferencia"`
pub fn humanize(key: &str) -> String {
    key.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of fetching one model's characteristics
#[derive(Debug, Clone, PartialEq)]
pub enum MetricFetch {
    Loaded(Vec<ModelMetric>),
    Failed(String),
}

/// One selected model and its metric outcome
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedModel {
    pub model_id: ModelId,
    pub name: String,
    pub metrics: MetricFetch,
}

impl ComparedModel {
    pub fn new(model: &AiModel, metrics: MetricFetch) -> Self {
        Self {
            model_id: model.model_id,
            name: model.name.clone(),
            metrics,
        }
    }

    /// Use the characteristics already attached to `model`
    pub fn from_model(model: &AiModel) -> Self {
        Self::new(model, MetricFetch::Loaded(model.characteristics.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Axis {
    /// Raw characteristic name
    pub key: String,
    pub label: String,
}

/// One radar axis with a value per model.
///
/// Serialises flat, as chart libraries expect:
/// `{"axis": "Precision", "GPT-4": 91.0, "Llama 3": 0.0}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub axis: Axis,
    pub values: Vec<(String, f64)>,
}

impl ComparisonRow {
    pub fn value(&self, model_name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == model_name)
            .map(|(_, value)| *value)
    }

    // same name twice: keep the first position, take the later value
    fn set(&mut self, model_name: &str, value: f64) {
        match self.values.iter_mut().find(|(name, _)| name == model_name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((model_name.to_string(), value)),
        }
    }
}

impl Serialize for ComparisonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("axis", &self.axis.label)?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComparisonFailure {
    pub model_id: ModelId,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Comparison {
    pub axes: Vec<Axis>,
    /// Model names plotted, in selection order
    pub series: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub failures: Vec<ComparisonFailure>,
}

impl Comparison {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.axis.key == key)
    }
}

fn chart_value(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(CHART_MIN, CHART_MAX)
    } else {
        CHART_MIN
    }
}

/// Build radar rows for `models` in the order given
pub fn build_comparison(models: &[ComparedModel]) -> Comparison {
    let mut comparison = Comparison::default();
    let mut loaded: Vec<(&str, &[ModelMetric])> = Vec::new();

    for model in models {
        match &model.metrics {
            MetricFetch::Loaded(metrics) => {
                loaded.push((model.name.as_str(), metrics.as_slice()));
                if !comparison.series.contains(&model.name) {
                    comparison.series.push(model.name.clone());
                }
            }
            MetricFetch::Failed(reason) => comparison.failures.push(ComparisonFailure {
                model_id: model.model_id,
                name: model.name.clone(),
                reason: reason.clone(),
            }),
        }
    }

    for (_, metrics) in &loaded {
        for metric in metrics.iter() {
            if !comparison
                .axes
                .iter()
                .any(|a| a.key == metric.characteristic_name)
            {
                comparison.axes.push(Axis {
                    key: metric.characteristic_name.clone(),
                    label: humanize(&metric.characteristic_name),
                });
            }
        }
    }

    comparison.rows = comparison
        .axes
        .iter()
        .map(|axis| {
            let mut row = ComparisonRow {
                axis: axis.clone(),
                values: Vec::with_capacity(loaded.len()),
            };
            for (name, metrics) in &loaded {
                let value = metrics
                    .iter()
                    .find(|m| m.characteristic_name == axis.key)
                    .map(|m| chart_value(m.value))
                    .unwrap_or(0.0);
                row.set(name, value);
            }
            row
        })
        .collect();

    comparison
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// Already holding [`MAX_COMPARED`] models; nothing changed
    Full,
}

/// Ordered set of models picked for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    selected: Vec<ModelId>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: ModelId) -> SelectionChange {
        if let Some(index) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(index);
            return SelectionChange::Removed;
        }
        if self.selected.len() >= MAX_COMPARED {
            return SelectionChange::Full;
        }
        self.selected.push(id);
        SelectionChange::Added
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &[ModelId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

/// Selection plus the latest comparison computed for it.
///
/// Changing the selection invalidates any comparison still being fetched,
/// so a slow response for an old selection never replaces a newer one.
#[derive(Debug, Default)]
pub struct ComparisonBoard {
    guard: ViewGuard,
    selection: ComparisonSelection,
    current: Option<Comparison>,
}

impl ComparisonBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    pub fn toggle(&mut self, id: ModelId) -> SelectionChange {
        let change = self.selection.toggle(id);
        if change != SelectionChange::Full {
            self.guard.teardown();
            self.current = None;
        }
        change
    }

    /// Ticket for a comparison about to be fetched
    pub fn begin(&self) -> ViewTicket {
        self.guard.begin()
    }

    /// Store `comparison` if `ticket` is still current
    pub fn publish(&mut self, ticket: ViewTicket, comparison: Comparison) -> bool {
        match self.guard.accept(ticket, comparison) {
            Some(comparison) => {
                self.current = Some(comparison);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Comparison> {
        self.current.as_ref()
    }

    pub fn teardown(&mut self) {
        self.guard.teardown();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(model: i64, name: &str, value: f64) -> ModelMetric {
        ModelMetric {
            characteristic_id: 0,
            model_id: ModelId::new(model),
            characteristic_name: name.to_string(),
            value,
            confidence_level: None,
            created_at: None,
        }
    }

    fn loaded(id: i64, name: &str, metrics: Vec<ModelMetric>) -> ComparedModel {
        ComparedModel {
            model_id: ModelId::new(id),
            name: name.to_string(),
            metrics: MetricFetch::Loaded(metrics),
        }
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("tiempo_inferencia"), "Tiempo Inferencia");
        assert_eq!(humanize("precision"), "Precision");
        assert_eq!(humanize("eficiencia_computacional"), "Eficiencia Computacional");
        // empty segments are kept, one space per underscore
        assert_eq!(humanize("a__b"), "A  B");
        assert_eq!(humanize("_x"), " X");
    }

    #[test]
    fn test_union_axes_and_zero_fill() {
        let models = vec![
            loaded(1, "A", vec![metric(1, "speed", 80.0)]),
            loaded(
                2,
                "B",
                vec![metric(2, "speed", 60.0), metric(2, "accuracy", 90.0)],
            ),
            loaded(3, "C", vec![]),
        ];
        let comparison = build_comparison(&models);

        let keys: Vec<_> = comparison.axes.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["speed", "accuracy"]);
        assert_eq!(comparison.rows.len(), 2);
        assert_eq!(comparison.series, vec!["A", "B", "C"]);

        let speed = comparison.row("speed").unwrap();
        assert_eq!(speed.value("A"), Some(80.0));
        assert_eq!(speed.value("B"), Some(60.0));
        assert_eq!(speed.value("C"), Some(0.0));

        let accuracy = comparison.row("accuracy").unwrap();
        assert_eq!(accuracy.value("A"), Some(0.0));
        assert_eq!(accuracy.value("B"), Some(90.0));
        assert_eq!(accuracy.value("C"), Some(0.0));
    }

    #[test]
    fn test_failed_fetch_is_excluded() {
        let models = vec![
            loaded(1, "A", vec![metric(1, "precision", 70.0)]),
            ComparedModel {
                model_id: ModelId::new(2),
                name: "B".to_string(),
                metrics: MetricFetch::Failed("Server error (500): boom".to_string()),
            },
        ];
        let comparison = build_comparison(&models);

        assert_eq!(comparison.series, vec!["A"]);
        assert_eq!(comparison.failures.len(), 1);
        assert_eq!(comparison.failures[0].model_id, ModelId::new(2));
        assert_eq!(comparison.row("precision").unwrap().values.len(), 1);
    }

    #[test]
    fn test_values_clamped_to_chart_scale() {
        let models = vec![loaded(
            1,
            "A",
            vec![
                metric(1, "perdida", -3.0),
                metric(1, "robustez", 140.0),
                metric(1, "convergencia", f64::NAN),
            ],
        )];
        let comparison = build_comparison(&models);
        assert_eq!(comparison.row("perdida").unwrap().value("A"), Some(0.0));
        assert_eq!(comparison.row("robustez").unwrap().value("A"), Some(100.0));
        assert_eq!(comparison.row("convergencia").unwrap().value("A"), Some(0.0));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let models = vec![
            loaded(1, "Twin", vec![metric(1, "precision", 10.0)]),
            loaded(2, "Twin", vec![metric(2, "precision", 20.0)]),
        ];
        let comparison = build_comparison(&models);
        let row = comparison.row("precision").unwrap();
        assert_eq!(row.values, vec![("Twin".to_string(), 20.0)]);
        assert_eq!(comparison.series, vec!["Twin"]);
    }

    #[test]
    fn test_row_serialises_flat() {
        let models = vec![
            loaded(1, "A", vec![metric(1, "tiempo_inferencia", 42.0)]),
            loaded(2, "B", vec![]),
        ];
        let comparison = build_comparison(&models);
        let json = serde_json::to_value(&comparison.rows[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"axis": "Tiempo Inferencia", "A": 42.0, "B": 0.0})
        );
    }

    #[test]
    fn test_selection_caps_at_three() {
        let mut selection = ComparisonSelection::new();
        for id in 1..=3 {
            assert_eq!(selection.toggle(ModelId::new(id)), SelectionChange::Added);
        }
        assert_eq!(selection.toggle(ModelId::new(4)), SelectionChange::Full);
        assert_eq!(selection.len(), 3);

        assert_eq!(selection.toggle(ModelId::new(2)), SelectionChange::Removed);
        assert_eq!(selection.ids(), &[ModelId::new(1), ModelId::new(3)]);
        assert_eq!(selection.toggle(ModelId::new(4)), SelectionChange::Added);
    }

    #[test]
    fn test_board_drops_comparison_for_old_selection() {
        let mut board = ComparisonBoard::new();
        board.toggle(ModelId::new(1));
        let stale = board.begin();

        board.toggle(ModelId::new(2));
        let fresh = board.begin();

        let models = vec![loaded(1, "A", vec![metric(1, "precision", 50.0)])];
        assert!(!board.publish(stale, build_comparison(&models)));
        assert!(board.current().is_none());

        assert!(board.publish(fresh, build_comparison(&models)));
        assert!(board.current().is_some());
    }
}
