use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Context provided to diagnostic renderers while producing output lines.
pub struct DiagnosticRenderContext<'a> {
    pub context: &'a str,
    pub verbose_info: bool,
}

/// Built-in output styles supported by the diagnostic manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticTemplate {
    Pretty,
    Plain,
}

impl DiagnosticTemplate {
    fn render(
        &self,
        diagnostic: &Diagnostic,
        ctx: &DiagnosticRenderContext<'_>,
    ) -> Option<Vec<String>> {
        match self {
            DiagnosticTemplate::Pretty => render_pretty(diagnostic, ctx),
            DiagnosticTemplate::Plain => render_plain(diagnostic, ctx),
        }
    }
}

/// Runtime configuration for emitting diagnostics.
#[derive(Debug, Clone)]
pub struct DiagnosticDisplayOptions {
    pub template: DiagnosticTemplate,
    pub verbose_info: bool,
}

impl DiagnosticDisplayOptions {
    pub fn pretty(verbose_info: bool) -> Self {
        Self {
            template: DiagnosticTemplate::Pretty,
            verbose_info,
        }
    }

    pub fn plain(verbose_info: bool) -> Self {
        Self {
            template: DiagnosticTemplate::Plain,
            verbose_info,
        }
    }
}

impl Default for DiagnosticDisplayOptions {
    fn default() -> Self {
        DiagnosticDisplayOptions::pretty(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub suggestions: Vec<String>,
    /// Element the diagnostic is attached to, usually a qualified interface name.
    pub source_context: Option<String>,
    pub code: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            suggestions: Vec::new(),
            source_context: None,
            code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = Some(context.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }

        if !self.suggestions.is_empty() {
            let hints = self.suggestions.join("; ");
            write!(f, " (hints: {})", hints)?;
        }

        Ok(())
    }
}

/// Receiver for recoverable problems found while processing.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosticManager {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_diagnostic(&self, diagnostic: Diagnostic) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic);
        }
    }

    pub fn get_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics
            .lock()
            .map(|d| d.iter().filter(|diag| diag.level == level).count())
            .unwrap_or(0)
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticLevel::Error) > 0
    }

    pub fn clear(&self) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.clear();
        }
    }

    /// Emit diagnostics using the provided options. The fallback context is used
    /// when a diagnostic does not specify a source context.
    pub fn emit(
        diagnostics: &[Diagnostic],
        fallback_context: Option<&str>,
        options: &DiagnosticDisplayOptions,
    ) {
        for line in Self::render(diagnostics, fallback_context, options) {
            eprintln!("{}", line);
        }
    }

    pub fn render(
        diagnostics: &[Diagnostic],
        fallback_context: Option<&str>,
        options: &DiagnosticDisplayOptions,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        for diagnostic in diagnostics {
            let context = diagnostic
                .source_context
                .as_deref()
                .or(fallback_context)
                .unwrap_or("lcgen");

            let render_ctx = DiagnosticRenderContext {
                context,
                verbose_info: options.verbose_info,
            };

            if let Some(rendered) = options.template.render(diagnostic, &render_ctx) {
                lines.extend(rendered);
            }
        }
        lines
    }
}

impl DiagnosticSink for DiagnosticManager {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Error => tracing::error!(context = ?diagnostic.source_context, "{}", diagnostic),
            DiagnosticLevel::Warning => warn!(context = ?diagnostic.source_context, "{}", diagnostic),
            DiagnosticLevel::Info => debug!(context = ?diagnostic.source_context, "{}", diagnostic),
        }
        self.add_diagnostic(diagnostic);
    }
}

fn render_pretty(diagnostic: &Diagnostic, ctx: &DiagnosticRenderContext<'_>) -> Option<Vec<String>> {
    if matches!(diagnostic.level, DiagnosticLevel::Info) && !ctx.verbose_info {
        return None;
    }

    let prefix = match diagnostic.level {
        DiagnosticLevel::Error => "\u{274c}",
        DiagnosticLevel::Warning => "\u{26a0}\u{fe0f} ",
        DiagnosticLevel::Info => "\u{2139}\u{fe0f} ",
    };

    let header = match diagnostic.code.as_ref() {
        Some(code) => format!(
            "{} [{}] {} ({})",
            prefix, ctx.context, diagnostic.message, code
        ),
        None => format!("{} [{}] {}", prefix, ctx.context, diagnostic.message),
    };

    let mut lines = vec![header];
    for suggestion in &diagnostic.suggestions {
        lines.push(format!("   \u{1f4a1} {}", suggestion));
    }

    Some(lines)
}

fn render_plain(diagnostic: &Diagnostic, ctx: &DiagnosticRenderContext<'_>) -> Option<Vec<String>> {
    if matches!(diagnostic.level, DiagnosticLevel::Info) && !ctx.verbose_info {
        return None;
    }

    let level = match diagnostic.level {
        DiagnosticLevel::Error => "ERROR",
        DiagnosticLevel::Warning => "WARNING",
        DiagnosticLevel::Info => "INFO",
    };

    let header = match diagnostic.code.as_ref() {
        Some(code) => format!(
            "[{}] {}: {} ({})",
            ctx.context, level, diagnostic.message, code
        ),
        None => format!("[{}] {}: {}", ctx.context, level, diagnostic.message),
    };

    let mut lines = vec![header];
    for suggestion in &diagnostic.suggestions {
        lines.push(format!("   suggestion: {}", suggestion));
    }

    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering_hides_info_unless_verbose() {
        let diagnostics = vec![
            Diagnostic::info("no property resource Foo_en.properties"),
            Diagnostic::warning("ambiguous constant overload 'size'")
                .with_source_context("demo.Foo")
                .with_code("lcgen::overload"),
        ];

        let quiet = DiagnosticManager::render(&diagnostics, None, &DiagnosticDisplayOptions::plain(false));
        assert_eq!(
            quiet,
            vec!["[demo.Foo] WARNING: ambiguous constant overload 'size' (lcgen::overload)".to_string()]
        );

        let verbose = DiagnosticManager::render(&diagnostics, Some("merge"), &DiagnosticDisplayOptions::plain(true));
        assert_eq!(verbose.len(), 2);
        assert_eq!(verbose[0], "[merge] INFO: no property resource Foo_en.properties");
    }

    #[test]
    fn manager_counts_levels() {
        let manager = DiagnosticManager::new();
        manager.report(Diagnostic::warning("w"));
        manager.report(Diagnostic::error("e"));
        assert!(manager.has_errors());
        assert_eq!(manager.count(DiagnosticLevel::Warning), 1);
        manager.clear();
        assert!(manager.get_diagnostics().is_empty());
    }
}
