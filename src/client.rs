use std::{io, fs};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use serde::Deserialize;
use crate::ast::Operator;
use crate::prover::{self, Catalog, Law, LawKind};
use crate::error::BoxedErrorTrait;

const CONFIG_FILE_PATH: &'static str = "config.toml";

fn read_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)?;
    Ok(buf)
}

/// The built-in catalogs
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Merged,
    Split,
}

impl CatalogKind {
    pub fn catalog(self) -> Catalog {
        match self {
            CatalogKind::Merged => Catalog::merged(),
            CatalogKind::Split => Catalog::split(),
        }
    }
}

impl Default for CatalogKind {
    fn default() -> Self {
        CatalogKind::Merged
    }
}

/// One `[[laws]]` table of a config
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LawEntry {
    pub name: String,
    pub kind: LawKind,
    #[serde(default)]
    pub operator: Option<Operator>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    catalog: CatalogKind,
    /// when present, these replace the built-in catalog
    #[serde(default)]
    laws: Vec<LawEntry>,
}

impl Config {
    /// Read `config.toml` from the working directory, falling back to the defaults without one
    pub fn load() -> Result<Config, BoxedErrorTrait> {
        if !Path::new(CONFIG_FILE_PATH).exists() {
            info!("no {}, using the merged catalog", CONFIG_FILE_PATH);
            return Ok(Config::default());
        }
        let buf = read_file(CONFIG_FILE_PATH)?;
        let config = buf.parse::<Config>()?;
        Ok(config)
    }
    /// The catalog proofs are checked against, unless a request names its own
    pub fn catalog(&self) -> Catalog {
        if self.laws.is_empty() {
            return self.catalog.catalog();
        }
        self.laws.iter().fold(Catalog::new(), |catalog, entry| {
            catalog.with_law(entry.name.as_str(), Law { kind: entry.kind, operator: entry.operator })
        })
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;
    fn from_str(source: &str) -> Result<Config, Self::Err> {
        toml::from_str(source)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StepEntry {
    pub law: String,
    pub formula: String,
}

/// A proof written out as TOML:
///
/// ```toml
/// formula = "* x7 * x6 - x6"
/// target = "0"
///
/// [[steps]]
/// law = "complement"
/// formula = "* x7 0"
///
/// [[steps]]
/// law = "domination"
/// formula = "0"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProofRequest {
    pub formula: String,
    pub target: String,
    /// overrides the catalog of the config
    #[serde(default)]
    pub catalog: Option<CatalogKind>,
    #[serde(default)]
    pub steps: Vec<StepEntry>,
}

impl ProofRequest {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ProofRequest, BoxedErrorTrait> {
        let buf = read_file(path)?;
        let request = buf.parse::<ProofRequest>()?;
        Ok(request)
    }
    /// Check the proof, returning `Ok(true)` iff it reaches its target
    pub fn verify(&self, config: &Config) -> Result<bool, BoxedErrorTrait> {
        let catalog = match self.catalog {
            Some(kind) => kind.catalog(),
            None => config.catalog(),
        };
        let steps = self.steps
            .iter()
            .map(|step| (step.law.as_str(), step.formula.as_str()))
            .collect::<Vec<_>>();
        prover::check_proof(&catalog, self.formula.as_str(), steps.as_slice(), self.target.as_str())
    }
}

impl FromStr for ProofRequest {
    type Err = toml::de::Error;
    fn from_str(source: &str) -> Result<ProofRequest, Self::Err> {
        toml::from_str(source)
    }
}

/// Verify every proof request in `paths`, returning whether all of them hold
pub fn start<S: AsRef<str>>(paths: &[S]) -> Result<bool, BoxedErrorTrait> {
    let config = Config::load()?;
    let mut all_proved = true;
    for path in paths.iter().map(|p| p.as_ref()) {
        let request = ProofRequest::load(path)?;
        let proved = request.verify(&config)?;
        info!("{}: {} steps, proved: {}", path, request.steps.len(), proved);
        println!("{}: {}", path, if proved { "proved" } else { "not proved" });
        all_proved &= proved;
    }
    Ok( all_proved )
}
