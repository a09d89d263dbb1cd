//! Core linter engine

use crate::config::Config;
use crate::directive::InlineDirectives;
use crate::error::{CoreError, LintError};
use crate::issue::{Issue, LintReport};
use crate::node::walk;
use crate::parser::{HtmlParser, Parser, ParserRegistry};
use crate::rule::RuleContext;
use log::{debug, error, trace, warn};
use rayon::prelude::*;
use std::sync::Arc;

/// Parser selection
#[derive(Clone)]
pub enum ParserSpec {
    /// Resolved by name through a [`ParserRegistry`]
    Named(String),
    /// Used as is
    Custom(Arc<dyn Parser>),
}

impl std::fmt::Debug for ParserSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ParserSpec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for ParserSpec {
    fn from(name: &str) -> Self {
        ParserSpec::Named(name.to_string())
    }
}

/// Linter construction options
#[derive(Debug, Clone)]
pub struct LinterOptions {
    /// Parser to use (None = built-in HTML parser)
    pub parser: Option<ParserSpec>,

    /// Honor `taglint-disable` comments
    pub inline_config: bool,

    /// Number of parallel jobs for [`Linter::lint_many`] (0 = auto-detect)
    pub jobs: usize,
}

impl Default for LinterOptions {
    fn default() -> Self {
        Self {
            parser: None,
            inline_config: true,
            jobs: 0,
        }
    }
}

impl LinterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parser(mut self, parser: impl Into<ParserSpec>) -> Self {
        self.parser = Some(parser.into());
        self
    }

    pub fn with_custom_parser(mut self, parser: Arc<dyn Parser>) -> Self {
        self.parser = Some(ParserSpec::Custom(parser));
        self
    }

    pub fn without_inline_config(mut self) -> Self {
        self.inline_config = false;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// The main linter engine
pub struct Linter {
    /// Rule table and settings
    config: Config,

    parser: Arc<dyn Parser>,

    inline_config: bool,

    jobs: usize,
}

impl Default for Linter {
    fn default() -> Self {
        Self {
            config: Config::default(),
            parser: Arc::new(HtmlParser::new()),
            inline_config: true,
            jobs: 0,
        }
    }
}

impl Linter {
    /// Create a linter, resolving named parsers against the default registry
    pub fn new(options: LinterOptions) -> Result<Self, CoreError> {
        Self::with_registry(options, &ParserRegistry::with_defaults())
    }

    /// Create a linter, resolving named parsers against `registry`
    pub fn with_registry(options: LinterOptions, registry: &ParserRegistry) -> Result<Self, CoreError> {
        let parser = match options.parser {
            None => Arc::new(HtmlParser::new()) as Arc<dyn Parser>,
            Some(ParserSpec::Custom(parser)) => parser,
            Some(ParserSpec::Named(name)) => {
                let parser = registry.resolve(&name).inspect_err(|e| {
                    warn!("{} (available: {})", e, registry.names().join(", "));
                })?;
                debug!("using parser {}", name);
                parser
            }
        };

        Ok(Self {
            config: Config::default(),
            parser,
            inline_config: options.inline_config,
            jobs: options.jobs,
        })
    }

    /// Set the configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replace the configuration (mutable reference)
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Lint a single document.
    ///
    /// Issues come in document order; for a given node, rules run in
    /// registration order. A rule returning an error aborts the run.
    pub fn lint(&self, source: &str) -> Result<Vec<Issue>, LintError> {
        let nodes = self.parser.parse(source)?;
        let active: Vec<_> = self.config.active_rules().collect();
        let mut issues = Vec::new();

        for node in walk(&nodes) {
            for (rule, setting) in &active {
                let mut ctx = RuleContext::new(rule.name(), setting.severity, &mut issues);
                if let Err(source) = rule.lint(node, &setting.options, &mut ctx) {
                    error!("rule {} failed at {:?}: {}", rule.name(), node.loc().start, source);
                    return Err(LintError::Rule {
                        rule: rule.name().to_string(),
                        source,
                    });
                }
            }
        }

        if self.inline_config {
            let directives = InlineDirectives::collect(&nodes);
            if !directives.is_empty() {
                let before = issues.len();
                issues.retain(|issue| !directives.suppresses(issue));
                debug!("{} issues suppressed by inline directives", before - issues.len());
            }
        }

        trace!(
            "linted {} bytes with {} active rules: {} issues",
            source.len(),
            active.len(),
            issues.len()
        );
        Ok(issues)
    }

    /// Lint a single document and count issues by severity
    pub fn lint_report(&self, source: &str) -> Result<LintReport, LintError> {
        self.lint(source).map(LintReport::from_issues)
    }

    /// Lint independent documents in parallel; results keep input order
    pub fn lint_many<S>(&self, sources: &[S]) -> Vec<Result<Vec<Issue>, LintError>>
    where
        S: AsRef<str> + Sync,
    {
        let jobs = if self.jobs > 0 {
            self.jobs
        } else {
            num_cpus::get()
        };

        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(|| {
                sources
                    .par_iter()
                    .map(|s| self.lint(s.as_ref()))
                    .collect()
            }),
            Err(e) => {
                warn!("falling back to sequential linting: {}", e);
                sources.iter().map(|s| self.lint(s.as_ref())).collect()
            }
        }
    }
}
