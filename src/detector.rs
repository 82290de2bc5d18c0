//! Multi-line link detection.
//!
//! Compiler and search output often prints a path heading once, followed
//! by rows that carry only `line[:col]` fragments. Detection runs on one
//! flattened logical line: match a fragment, scan upward for the path the
//! fragments belong to, resolve that path, and map the match back onto
//! wrapped buffer cells.

use crate::buffer;
use crate::config::DetectionLimits;
use crate::coords;
use crate::error::Error;
use crate::matcher;
use crate::resolver::LinkResolver;
use crate::types::{
    BufferLine, CandidateMatch, ProcessContext, ResolvedTarget, Selection, SimpleLink,
};
use crate::workspace::WorkspaceRoots;

/// Detects links that span multiple logical lines of terminal output.
///
/// The detector holds no mutable state: repeated calls over an unchanged
/// snapshot produce identical results, and calls for disjoint row ranges
/// are independent.
pub struct MultiLineDetector<'a> {
    /// Viewport width in cells.
    cols: usize,
    /// Scan and resolve guards.
    limits: DetectionLimits,
    /// Session context handed to the resolver.
    process: ProcessContext,
    /// Backend that verifies path candidates.
    resolver: &'a dyn LinkResolver,
    /// Roots dividing in-workspace from outside-workspace folders.
    workspace: &'a WorkspaceRoots,
}

impl<'a> MultiLineDetector<'a> {
    /// Builds the emitted link: classify the target, aim the caret at the
    /// matched position, and cover the whole logical line in the buffer.
    fn assemble(
        &self,
        candidate: &CandidateMatch,
        target: ResolvedTarget,
        text: &str,
        start_row: usize,
    ) -> SimpleLink {
        let class = self.workspace.classify(&target);
        let text_cells = text.chars().count();
        let buffer_range = coords::map_text_range_to_buffer(
            1,
            text_cells.saturating_add(1),
            self.cols,
            start_row,
        );
        return SimpleLink {
            buffer_range,
            class,
            selection: Selection {
                column: candidate.column.unwrap_or(1),
                line: candidate.line_number,
            },
            text: candidate.raw_fragment.clone(),
            uri: target.uri,
        };
    }

    /// Detect links on the logical line spanning `start_row..=end_row` of
    /// the snapshot. At most one link is emitted per call.
    ///
    /// Shapes are tried in a fixed order and the first structural match is
    /// final: when its candidate fails a guard or does not resolve, the
    /// call yields an empty result rather than falling through to later
    /// shapes.
    ///
    /// # Errors
    ///
    /// Propagates resolver faults. A candidate that merely does not exist
    /// is a miss, not an error, and yields an empty result.
    pub fn detect(
        &self,
        lines: &[BufferLine],
        start_row: usize,
        end_row: usize,
    ) -> Result<Vec<SimpleLink>, Error> {
        let text = buffer::line_content(lines, start_row, end_row, self.cols);
        if text.is_empty() || text.chars().count() > self.limits.max_line_length {
            return Ok(Vec::new());
        }
        tracing::trace!("detecting links in {text:?}");

        if let Some(link) = self.detect_line_prefix(lines, start_row, &text)? {
            return Ok(vec![link]);
        }
        if let Some(link) = self.detect_hunk_header(lines, start_row, &text)? {
            return Ok(vec![link]);
        }
        return Ok(Vec::new());
    }

    /// The diff hunk header shape: `@@ ... @@` on this line, with the file
    /// named on a `+++ b/` row further up.
    fn detect_hunk_header(
        &self,
        lines: &[BufferLine],
        start_row: usize,
        text: &str,
    ) -> Result<Option<SimpleLink>, Error> {
        let Some(candidate) = matcher::match_hunk_header(text) else {
            return Ok(None);
        };
        if candidate.raw_fragment.chars().count() > self.limits.max_link_length {
            tracing::trace!("hunk fragment exceeds resolve guard, dropping");
            return Ok(None);
        }
        let Some(path) = self.scan_up_for_diff_target(lines, start_row) else {
            tracing::trace!("no diff target row above row {start_row}");
            return Ok(None);
        };
        return self.resolve_and_assemble(&candidate, &path, text, start_row);
    }

    /// The line prefix shape: `line[:col]` opening this line, with the
    /// path on the nearest prior row that is not itself a fragment row.
    fn detect_line_prefix(
        &self,
        lines: &[BufferLine],
        start_row: usize,
        text: &str,
    ) -> Result<Option<SimpleLink>, Error> {
        let Some(candidate) = matcher::match_line_prefix(text) else {
            return Ok(None);
        };
        if candidate.raw_fragment.chars().count() > self.limits.max_link_length {
            tracing::trace!("fragment exceeds resolve guard, dropping");
            return Ok(None);
        }
        let Some(path) = self.scan_up_for_path(lines, start_row) else {
            tracing::trace!("no path row above row {start_row}");
            return Ok(None);
        };
        return self.resolve_and_assemble(&candidate, &path, text, start_row);
    }

    /// A detector wired to a resolver, workspace roots, session context,
    /// guards, and viewport geometry.
    pub fn new(
        resolver: &'a dyn LinkResolver,
        workspace: &'a WorkspaceRoots,
        process: ProcessContext,
        limits: DetectionLimits,
        cols: usize,
    ) -> Self {
        return MultiLineDetector {
            cols,
            limits,
            process,
            resolver,
            workspace,
        };
    }

    /// Resolves a path candidate and assembles the link when it exists.
    ///
    /// # Errors
    ///
    /// Propagates resolver faults.
    fn resolve_and_assemble(
        &self,
        candidate: &CandidateMatch,
        path: &str,
        text: &str,
        start_row: usize,
    ) -> Result<Option<SimpleLink>, Error> {
        let Some(target) = self.resolver.resolve_link(&self.process, path)? else {
            tracing::trace!("path candidate {path:?} did not resolve");
            return Ok(None);
        };
        tracing::trace!("emitting link for {path:?}");
        return Ok(Some(self.assemble(candidate, target, text, start_row)));
    }

    /// Walks upward from the row above `start_row` for the file a diff
    /// hunk belongs to, named on its `+++ b/` post-image row.
    fn scan_up_for_diff_target(&self, lines: &[BufferLine], start_row: usize) -> Option<String> {
        for row in (0..start_row).rev() {
            let line = lines.get(row)?;
            if line.wrapped {
                continue;
            }
            let content = buffer::line_content(lines, row, row, self.cols);
            if let Some(path) = matcher::diff_target_path(&content) {
                return Some(path);
            }
        }
        return None;
    }

    /// Walks upward from the row above `start_row` for the path heading
    /// the fragment belongs to. Continuation rows are skipped, and rows
    /// opening with an indented digit are taken to be further fragment
    /// rows. The first remaining row is the candidate, verbatim.
    fn scan_up_for_path(&self, lines: &[BufferLine], start_row: usize) -> Option<String> {
        for row in (0..start_row).rev() {
            let line = lines.get(row)?;
            if line.wrapped {
                continue;
            }
            let content = buffer::line_content(lines, row, row, self.cols);
            if !matcher::is_numeric_prefixed(&content) {
                return Some(content);
            }
        }
        return None;
    }
}
