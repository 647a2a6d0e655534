use super::*;

/// Sample submission used by the contact-form contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSample {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Default for ContactSample {
    fn default() -> Self {
        Self {
            name: "Test User".into(),
            email: "test@example.com".into(),
            message: "This is a test message".into(),
        }
    }
}

/// Tunables for the standard suite. The defaults reproduce the contract
/// the suite was written against; override fields to point it at another
/// product.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub product_name: String,
    pub root_path: String,
    /// Settling delay after each page load, for asynchronous content.
    pub settle_ms: i64,
    /// Settling delay after each viewport change.
    pub viewport_settle_ms: i64,
    pub mobile_viewport: Viewport,
    pub desktop_viewport: Viewport,
    pub search_query: String,
    pub contact: ContactSample,
    /// When set, the footer year must also appear as a standalone digit
    /// token, not inside a longer digit run. Off by default: the base
    /// contract is plain containment.
    pub strict_year_token: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            product_name: "My Web Application".into(),
            root_path: "/".into(),
            settle_ms: 1000,
            viewport_settle_ms: 500,
            mobile_viewport: ViewportPreset::IphoneX.into(),
            desktop_viewport: Viewport::new(1200, 800),
            search_query: "test search".into(),
            contact: ContactSample::default(),
            strict_year_token: false,
        }
    }
}

pub type ScenarioFn = fn(&mut Browser, &SuiteConfig) -> Result<()>;

/// One independent check in the suite. Scenarios share no state; each one
/// runs against a freshly loaded page.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub run: ScenarioFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The page could not be loaded or parsed during setup.
    PageLoad,
    /// A selector matched nothing.
    ElementNotFound,
    /// An expected condition was false.
    AssertionFailed,
    /// An interaction could not complete.
    ActionFailed,
}

impl FailureKind {
    fn classify(error: &Error) -> Self {
        match error {
            Error::PageLoad(_) | Error::HtmlParse(_) | Error::StyleParse(_) => Self::PageLoad,
            Error::SelectorNotFound(_) | Error::UnsupportedSelector(_) => Self::ElementNotFound,
            Error::AssertionFailed { .. } => Self::AssertionFailed,
            Error::ActionFailed { .. } => Self::ActionFailed,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PageLoad => "page-load",
            Self::ElementNotFound => "element-not-found",
            Self::AssertionFailed => "assertion-failure",
            Self::ActionFailed => "action-failure",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub outcome: Outcome,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed)
    }
}

/// Per-scenario pass/fail results for one suite run. There are no partial
/// successes: a scenario either ran its every assertion or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.scenarios.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn outcome_of(&self, name: &str) -> Option<&Outcome> {
        self.scenarios
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.outcome)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scenario in &self.scenarios {
            match &scenario.outcome {
                Outcome::Passed => writeln!(f, "PASS {}", scenario.name)?,
                Outcome::Failed { kind, message } => {
                    writeln!(f, "FAIL {} ({kind}): {message}", scenario.name)?
                }
            }
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}

/// A declarative list of independent page contracts, run sequentially.
/// Before every scenario the root page is reloaded and the settling delay
/// elapses, so one scenario can never leak state into the next; a failure
/// is recorded and the remaining scenarios still run.
#[derive(Debug, Clone)]
pub struct PageAcceptanceSuite {
    config: SuiteConfig,
    scenarios: Vec<Scenario>,
}

impl PageAcceptanceSuite {
    pub fn new(config: SuiteConfig) -> Self {
        Self {
            config,
            scenarios: Vec::new(),
        }
    }

    /// The eight standard contracts: title, navigation, main content,
    /// footer, responsive menu, search, image loading, contact form.
    pub fn standard(config: SuiteConfig) -> Self {
        let mut suite = Self::new(config);
        suite.add_scenario("has the correct title", scenarios::title_contract);
        suite.add_scenario("has navigation elements", scenarios::navigation_contract);
        suite.add_scenario("loads main content section", scenarios::main_content_contract);
        suite.add_scenario(
            "displays footer with copyright info",
            scenarios::footer_contract,
        );
        suite.add_scenario(
            "has responsive design elements",
            scenarios::responsive_contract,
        );
        suite.add_scenario("has functional search capability", scenarios::search_contract);
        suite.add_scenario("loads images correctly", scenarios::image_load_contract);
        suite.add_scenario("has working contact form", scenarios::contact_form_contract);
        suite
    }

    pub fn add_scenario(&mut self, name: &'static str, run: ScenarioFn) -> &mut Self {
        self.scenarios.push(Scenario { name, run });
        self
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn run(&self, browser: &mut Browser) -> SuiteReport {
        let mut reports = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            let outcome = match self.run_one(scenario, browser) {
                Ok(()) => Outcome::Passed,
                Err(error) => Outcome::Failed {
                    kind: FailureKind::classify(&error),
                    message: error.to_string(),
                },
            };
            reports.push(ScenarioReport {
                name: scenario.name,
                outcome,
            });
        }
        SuiteReport { scenarios: reports }
    }

    fn run_one(&self, scenario: &Scenario, browser: &mut Browser) -> Result<()> {
        browser.visit(&self.config.root_path)?;
        browser.wait(self.config.settle_ms)?;
        (scenario.run)(browser, &self.config)
    }
}
