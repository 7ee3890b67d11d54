//! Per-theme orchestration: prompt, model, parse, reconcile.
//!
//! Themes are processed one at a time. Every per-theme failure ends up as a
//! field of that theme's [`ThemeResult`]; nothing aborts the batch.

use director_catalog::{GenreStats, SummaryOptions, genre_stats, summarize};
use director_core::{Catalog, PlaylistSuggestion, ThemeSpec};
use serde::Serialize;
use tracing::{info, warn};

use crate::collections::CollectionService;
use crate::llm::ChatModel;
use crate::prompt::build_prompt;
use crate::reconcile::{ApplyOutcome, reconcile};
use crate::suggestion::parse_suggestion;
use crate::{CollectionError, GenerationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Generate and write to the collection service.
    Apply,
    /// Generate only.
    Preview,
}

/// Outcome of one theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeResult {
    pub theme: String,
    /// A suggestion was generated and applied.
    pub success: bool,
    pub suggestion: Option<PlaylistSuggestion>,
    pub applied: bool,
}

pub struct Director<'a> {
    model: &'a dyn ChatModel,
    collections: &'a dyn CollectionService,
    summary: String,
    stats: GenreStats,
}

impl<'a> Director<'a> {
    /// Summarize `catalog` once; every theme in the run reuses it.
    pub fn new(
        catalog: &Catalog,
        options: &SummaryOptions,
        model: &'a dyn ChatModel,
        collections: &'a dyn CollectionService,
    ) -> Self {
        Self {
            model,
            collections,
            summary: summarize(catalog, options),
            stats: genre_stats(catalog),
        }
    }

    pub fn catalog_summary(&self) -> &str {
        &self.summary
    }

    /// Ask the model for a suggestion for `theme`.
    pub async fn generate(&self, theme: &ThemeSpec) -> Result<PlaylistSuggestion, GenerationError> {
        let prompt = build_prompt(theme, &self.summary, &self.stats);
        info!(theme = %theme.name, model = self.model.model(), "generating playlist");

        let raw = self.model.complete(&prompt).await?;
        let mut suggestion = parse_suggestion(&raw)?;

        if suggestion.theme_name.is_empty() {
            suggestion.theme_name = theme.name.clone();
        }
        if suggestion.collection_name.is_empty() {
            suggestion.collection_name = theme.name.clone();
        }

        info!(
            theme = %theme.name,
            collection = %suggestion.collection_name,
            selected = suggestion.total_selections(),
            "suggestion generated"
        );
        Ok(suggestion)
    }

    pub async fn apply(
        &self,
        suggestion: &PlaylistSuggestion,
    ) -> Result<ApplyOutcome, CollectionError> {
        reconcile(self.collections, suggestion).await
    }

    /// Run one theme to completion, folding failures into the result.
    pub async fn run_theme(&self, theme: &ThemeSpec, mode: RunMode) -> ThemeResult {
        let mut result = ThemeResult {
            theme: theme.name.clone(),
            success: false,
            suggestion: None,
            applied: false,
        };

        let suggestion = match self.generate(theme).await {
            Ok(s) => s,
            Err(e) => {
                warn!(theme = %theme.name, error = %e, "no suggestion produced");
                return result;
            }
        };

        if mode == RunMode::Apply {
            result.applied = match self.apply(&suggestion).await {
                Ok(ApplyOutcome::Skipped) => {
                    warn!(theme = %theme.name, "suggestion selected no titles, not applied");
                    false
                }
                Ok(outcome) => {
                    info!(theme = %theme.name, ?outcome, "collection applied");
                    true
                }
                Err(e) => {
                    warn!(theme = %theme.name, error = %e, "failed to apply collection");
                    false
                }
            };
        }

        result.success = result.applied;
        result.suggestion = Some(suggestion);
        result
    }

    /// Run every theme in order; one theme's failure never stops the rest.
    pub async fn run_all(&self, themes: &[ThemeSpec], mode: RunMode) -> Vec<ThemeResult> {
        let mut results = Vec::with_capacity(themes.len());
        for theme in themes {
            results.push(self.run_theme(theme, mode).await);
        }
        results
    }
}
