use crate::app::advisor::RecommendationSource;
use crate::app::error::{ClientError, ValidationError};
use crate::app::generators::GeneratorKind;
use crate::app::inspector::MetadataSource;
use crate::app::models::{RecommendationEntry, RecommendationResponse, TableMetadataResponse};
use crate::app::recommend::{self, AUTO_ACCEPT_THRESHOLD, GeneratorSelections};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const DEFAULT_RECORDS: u64 = 10;
pub const MAX_KEY_REUSE: u8 = 100;

/// Parses the leading digits of free text, falling back when there are none.
/// `"25"`, `"+25"` and `" 25 rows"` give 25; `""`, `"abc"` and `"-3"` give the fallback.
pub fn parse_int_or(text: &str, fallback: u64) -> u64 {
    let trimmed = text.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().unwrap_or(fallback)
}

/// Per-table knobs the user adjusts before generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableControls {
    pub records_to_generate: u64,
    pub key_reuse_percent: u8,
    pub expanded: bool,
    pub truncate: bool,
    pub generate: bool,
}

impl Default for TableControls {
    fn default() -> Self {
        Self {
            records_to_generate: DEFAULT_RECORDS,
            key_reuse_percent: 0,
            expanded: false,
            truncate: false,
            generate: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

/// Handed out by [`Session::begin_scan`]; the response is applied against it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ScanTicket {
    generation: u64,
    table_name: String,
}

impl ScanTicket {
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RecommendTicket {
    generation: u64,
    scan_generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed(ClientError),
    /// A newer request started after this one; the response was dropped.
    Stale,
}

/// UI state for one user: the current scan, the generator selections made
/// against it, and the per-table controls.
///
/// All mutation goes through the methods below. Network calls are split into
/// `begin_*` and `apply_*` so a response that arrives after a newer request
/// started can be recognised and dropped.
#[derive(Debug)]
pub struct Session {
    threshold: u8,
    metadata: Option<TableMetadataResponse>,
    scanned_table: Option<String>,
    recommendations: Option<RecommendationResponse>,
    selections: GeneratorSelections,
    controls: BTreeMap<String, TableControls>,
    scan_generation: u64,
    recommend_generation: u64,
    scan_in_flight: Option<u64>,
    recommend_in_flight: Option<u64>,
    notification: Option<Notification>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AUTO_ACCEPT_THRESHOLD)
    }
}

impl Session {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            metadata: None,
            scanned_table: None,
            recommendations: None,
            selections: GeneratorSelections::new(),
            controls: BTreeMap::new(),
            scan_generation: 0,
            recommend_generation: 0,
            scan_in_flight: None,
            recommend_in_flight: None,
            notification: None,
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn metadata(&self) -> Option<&TableMetadataResponse> {
        self.metadata.as_ref()
    }

    pub fn scanned_table(&self) -> Option<&str> {
        self.scanned_table.as_deref()
    }

    pub fn recommendations(&self) -> Option<&RecommendationResponse> {
        self.recommendations.as_ref()
    }

    pub fn selections(&self) -> &GeneratorSelections {
        &self.selections
    }

    pub fn controls(&self, table: &str) -> Option<&TableControls> {
        self.controls.get(table)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn is_scan_disabled(&self) -> bool {
        self.scan_in_flight.is_some()
    }

    pub fn is_recommend_disabled(&self) -> bool {
        self.metadata.is_none() || self.recommend_in_flight.is_some()
    }

    pub fn recommendation_for(&self, table: &str, column: &str) -> Option<&RecommendationEntry> {
        self.recommendations.as_ref()?.entry_for(table, column)
    }

    // --- scan ---

    pub fn begin_scan(&mut self, table_name: &str) -> Result<ScanTicket, ValidationError> {
        let table_name = table_name.trim();
        if table_name.is_empty() {
            return Err(ValidationError::EmptyTableName);
        }
        if self.scan_in_flight.is_some() {
            return Err(ValidationError::ScanInFlight);
        }

        self.scan_generation += 1;
        self.scan_in_flight = Some(self.scan_generation);
        debug!(table = table_name, generation = self.scan_generation, "scan started");

        Ok(ScanTicket {
            generation: self.scan_generation,
            table_name: table_name.to_string(),
        })
    }

    pub fn apply_scan(
        &mut self,
        ticket: ScanTicket,
        result: Result<TableMetadataResponse, ClientError>,
    ) -> Applied {
        if self.scan_in_flight == Some(ticket.generation) {
            self.scan_in_flight = None;
        }
        if ticket.generation != self.scan_generation {
            debug!(
                table = %ticket.table_name,
                generation = ticket.generation,
                current = self.scan_generation,
                "discarding stale scan response"
            );
            return Applied::Stale;
        }

        match result {
            Ok(metadata) => {
                self.controls = metadata
                    .tables()
                    .map(|(_, t)| (t.name.clone(), TableControls::default()))
                    .collect();
                self.metadata = Some(metadata);
                self.scanned_table = Some(ticket.table_name.clone());
                self.recommendations = None;
                self.selections.reset();
                self.notify(
                    Severity::Success,
                    format!("Metadata loaded for '{}'", ticket.table_name),
                );
                Applied::Updated
            }
            Err(err) => {
                self.notify(Severity::Error, format!("Failed to scan metadata: {}", err));
                Applied::Failed(err)
            }
        }
    }

    /// Begin, fetch and apply a scan in one step.
    pub async fn scan(
        &mut self,
        source: &dyn MetadataSource,
        table_name: &str,
    ) -> Result<Applied, ValidationError> {
        let ticket = self.begin_scan(table_name)?;
        let result = source.fetch_metadata(ticket.table_name()).await;
        Ok(self.apply_scan(ticket, result))
    }

    // --- recommendations ---

    pub fn begin_recommend(&mut self) -> Result<RecommendTicket, ValidationError> {
        if self.metadata.is_none() {
            return Err(ValidationError::NoMetadata);
        }
        if self.recommend_in_flight.is_some() {
            return Err(ValidationError::RecommendationInFlight);
        }

        self.recommend_generation += 1;
        self.recommend_in_flight = Some(self.recommend_generation);
        Ok(RecommendTicket {
            generation: self.recommend_generation,
            scan_generation: self.scan_generation,
        })
    }

    pub fn apply_recommendations(
        &mut self,
        ticket: RecommendTicket,
        result: Result<RecommendationResponse, ClientError>,
    ) -> Applied {
        if self.recommend_in_flight == Some(ticket.generation) {
            self.recommend_in_flight = None;
        }
        if ticket.generation != self.recommend_generation
            || ticket.scan_generation != self.scan_generation
        {
            debug!(
                generation = ticket.generation,
                scan_generation = ticket.scan_generation,
                "discarding stale recommendation response"
            );
            return Applied::Stale;
        }

        match result {
            Ok(recommendations) => {
                let before = self.selections.len();
                self.selections = recommend::merge(&self.selections, &recommendations, self.threshold);
                let applied = self.selections.len() - before;
                self.recommendations = Some(recommendations);
                self.notify(
                    Severity::Info,
                    format!(
                        "Recommendations received; {} generator(s) auto-selected at >= {}% confidence",
                        applied, self.threshold
                    ),
                );
                Applied::Updated
            }
            Err(err) => {
                self.notify(
                    Severity::Error,
                    format!("Failed to fetch recommendations: {}", err),
                );
                Applied::Failed(err)
            }
        }
    }

    /// Begin, fetch and apply recommendations for the current scan.
    pub async fn recommend(
        &mut self,
        source: &dyn RecommendationSource,
    ) -> Result<Applied, ValidationError> {
        let ticket = self.begin_recommend()?;
        let result = match &self.metadata {
            Some(metadata) => source.fetch_recommendations(metadata).await,
            None => {
                self.recommend_in_flight = None;
                return Err(ValidationError::NoMetadata);
            }
        };
        Ok(self.apply_recommendations(ticket, result))
    }

    // --- handlers ---

    pub fn select_generator(
        &mut self,
        table: &str,
        column: &str,
        generator: Option<GeneratorKind>,
    ) -> Result<(), ValidationError> {
        self.check_column(table, column)?;
        match generator {
            Some(g) => self.selections.select(column, g),
            None => {
                self.selections.clear(column);
            }
        }
        Ok(())
    }

    pub fn set_records_text(&mut self, table: &str, text: &str) -> Result<u64, ValidationError> {
        let records = parse_int_or(text, 0);
        self.controls_mut(table)?.records_to_generate = records;
        Ok(records)
    }

    pub fn set_key_reuse(&mut self, table: &str, percent: u8) -> Result<u8, ValidationError> {
        let percent = percent.min(MAX_KEY_REUSE);
        self.controls_mut(table)?.key_reuse_percent = percent;
        Ok(percent)
    }

    pub fn toggle_expanded(&mut self, table: &str) -> Result<bool, ValidationError> {
        let controls = self.controls_mut(table)?;
        controls.expanded = !controls.expanded;
        Ok(controls.expanded)
    }

    pub fn set_expanded_all(&mut self, expanded: bool) {
        for controls in self.controls.values_mut() {
            controls.expanded = expanded;
        }
    }

    pub fn toggle_truncate(&mut self, table: &str) -> Result<bool, ValidationError> {
        let controls = self.controls_mut(table)?;
        controls.truncate = !controls.truncate;
        Ok(controls.truncate)
    }

    pub fn toggle_generate(&mut self, table: &str) -> Result<bool, ValidationError> {
        let controls = self.controls_mut(table)?;
        controls.generate = !controls.generate;
        Ok(controls.generate)
    }

    pub fn set_truncate(&mut self, table: &str, truncate: bool) -> Result<(), ValidationError> {
        self.controls_mut(table)?.truncate = truncate;
        Ok(())
    }

    pub fn set_generate(&mut self, table: &str, generate: bool) -> Result<(), ValidationError> {
        self.controls_mut(table)?.generate = generate;
        Ok(())
    }

    fn controls_mut(&mut self, table: &str) -> Result<&mut TableControls, ValidationError> {
        self.controls
            .get_mut(table)
            .ok_or_else(|| ValidationError::UnknownTable(table.to_string()))
    }

    fn check_column(&self, table: &str, column: &str) -> Result<(), ValidationError> {
        let table_info = self
            .metadata
            .as_ref()
            .and_then(|m| m.find_table(table))
            .ok_or_else(|| ValidationError::UnknownTable(table.to_string()))?;

        match table_info.column(column) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
        }
    }

    fn notify(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Error => warn!("{}", message),
            _ => info!("{}", message),
        }
        self.notification = Some(Notification { severity, message });
    }
}
