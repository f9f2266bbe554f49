//! JSON project configuration files.
//!
//! Counts may be written as JSON numbers or as numeric strings, and topology
//! parameters may be strings or numbers; both are normalised before the
//! configuration reaches the core. Keys the generator does not use, such as
//! `projectName` or tool versions, are ignored.

use std::{collections::BTreeMap, fs, path::Path};

use modforge_core::{
    CodeMassTotals, ProjectConfig, TopologyKind, TopologyParameters, TopologySpec,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    num_modules: Count,
    #[serde(default)]
    topologies: Vec<RawTopology>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
    java_package_count: Option<Count>,
    java_class_count: Option<Count>,
    java_method_count: Option<Count>,
    kotlin_package_count: Option<Count>,
    kotlin_class_count: Option<Count>,
    android_modules: Option<Count>,
    num_activities_per_android_module: Option<Count>,
    #[serde(default)]
    product_flavors: Vec<Count>,
    build_types: Option<Count>,
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    parameters: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    from: Count,
    to: Count,
}

/// A count written either as `5` or as `"5"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Number(i64),
    Text(String),
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read and the errors of
/// [`parse_config`] otherwise.
#[instrument(name = "cli.load_config", err, fields(path = field::Empty))]
pub fn load_config(path: &Path) -> Result<ProjectConfig, CliError> {
    Span::current().record("path", field::display(path.display()));
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, path)
}

/// Parses a JSON configuration document; `origin` names it in errors.
///
/// # Errors
/// Returns [`CliError::Json`] for malformed JSON or a missing `numModules`,
/// [`CliError::InvalidValue`] for counts that are not integers, and
/// [`CliError::Core`] for an unknown topology `type`.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use modforge_cli::cli::parse_config;
///
/// let json = r#"{"numModules": "3", "topologies": [{"type": "linear"}], "javaClassCount": 9}"#;
/// let config = parse_config(json, Path::new("inline.json")).expect("valid config");
/// assert_eq!(config.num_modules(), 3);
/// assert_eq!(config.code_mass().java_class_count, 9);
/// ```
pub fn parse_config(text: &str, origin: &Path) -> Result<ProjectConfig, CliError> {
    let raw: RawConfig = serde_json::from_str(text).map_err(|source| CliError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    let fields = FieldReader { origin };

    let num_modules = fields.index("numModules", &raw.num_modules)?;
    let mut builder = ProjectConfig::builder(num_modules);

    for (position, topology) in raw.topologies.iter().enumerate() {
        builder = builder.with_topology(fields.topology(position, topology)?);
    }
    for (position, dependency) in raw.dependencies.iter().enumerate() {
        let from = fields.index(&format!("dependencies[{position}].from"), &dependency.from)?;
        let to = fields.index(&format!("dependencies[{position}].to"), &dependency.to)?;
        builder = builder.with_dependency(from, to);
    }

    let code_mass = CodeMassTotals {
        java_package_count: fields.optional("javaPackageCount", raw.java_package_count.as_ref())?,
        java_class_count: fields.optional("javaClassCount", raw.java_class_count.as_ref())?,
        java_method_count: fields.optional("javaMethodCount", raw.java_method_count.as_ref())?,
        kotlin_package_count: fields
            .optional("kotlinPackageCount", raw.kotlin_package_count.as_ref())?,
        kotlin_class_count: fields.optional("kotlinClassCount", raw.kotlin_class_count.as_ref())?,
    };
    let android_modules = fields.optional("androidModules", raw.android_modules.as_ref())?;
    let activities = fields.optional(
        "numActivitiesPerAndroidModule",
        raw.num_activities_per_android_module.as_ref(),
    )?;
    let product_flavors = raw
        .product_flavors
        .iter()
        .enumerate()
        .map(|(position, count)| fields.integer(&format!("productFlavors[{position}]"), count))
        .collect::<Result<Vec<_>, _>>()?;
    let build_types = fields.optional("buildTypes", raw.build_types.as_ref())?;

    let config = builder
        .with_code_mass(code_mass)
        .with_android_modules(android_modules, activities)
        .with_product_flavors(product_flavors)
        .with_build_types(build_types)
        .build();
    debug!(
        num_modules,
        topologies = config.topologies().len(),
        dependencies = config.dependencies().len(),
        "configuration parsed"
    );
    Ok(config)
}

struct FieldReader<'a> {
    origin: &'a Path,
}

impl FieldReader<'_> {
    fn invalid(&self, field: &str, value: impl Into<String>, expected: &'static str) -> CliError {
        CliError::InvalidValue {
            path: self.origin.to_path_buf(),
            field: field.to_owned(),
            value: value.into(),
            expected,
        }
    }

    fn integer(&self, field: &str, count: &Count) -> Result<i64, CliError> {
        match count {
            Count::Number(value) => Ok(*value),
            Count::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| self.invalid(field, text.as_str(), "an integer")),
        }
    }

    fn optional(&self, field: &str, count: Option<&Count>) -> Result<i64, CliError> {
        count.map_or(Ok(0), |count| self.integer(field, count))
    }

    fn index(&self, field: &str, count: &Count) -> Result<usize, CliError> {
        let value = self.integer(field, count)?;
        usize::try_from(value)
            .map_err(|_| self.invalid(field, value.to_string(), "a non-negative integer"))
    }

    fn topology(&self, position: usize, raw: &RawTopology) -> Result<TopologySpec, CliError> {
        let kind: TopologyKind = raw.kind.parse()?;
        let parameters = raw
            .parameters
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text.clone(),
                    Value::Number(number) => number.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    other => {
                        return Err(self.invalid(
                            &format!("topologies[{position}].{key}"),
                            other.to_string(),
                            "a string or number",
                        ));
                    }
                };
                Ok((key.clone(), text))
            })
            .collect::<Result<TopologyParameters, CliError>>()?;
        Ok(TopologySpec::new(kind, parameters))
    }
}
