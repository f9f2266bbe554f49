//! Edge lists and configuration documents shared by tests and benches.

/// Three modules depending on each other in a ring: `0 -> 1 -> 2 -> 0`.
#[must_use]
pub fn triangle() -> Vec<(usize, usize)> {
    vec![(0, 1), (1, 2), (2, 0)]
}

/// A simple path `0 -> 1 -> ... -> len - 1`.
///
/// # Examples
/// ```
/// use modforge_test_support::fixtures::chain;
///
/// assert_eq!(chain(3), vec![(0, 1), (1, 2)]);
/// assert!(chain(1).is_empty());
/// ```
#[must_use]
pub fn chain(len: usize) -> Vec<(usize, usize)> {
    (1..len).map(|to| (to - 1, to)).collect()
}

/// A diamond `0 -> {1, 2} -> 3`, acyclic with a shared descendant.
#[must_use]
pub fn diamond() -> Vec<(usize, usize)> {
    vec![(0, 1), (0, 2), (1, 3), (2, 3)]
}

/// Configuration document in the shape operators write by hand.
///
/// Counts are mostly numeric strings, `productFlavors` and `dependencies` use
/// plain numbers, and the project metadata entries are ignored by the
/// blueprint pipeline.
pub const SAMPLE_CONFIG: &str = r#"{
  "projectName": "genny",
  "root": "./modules/",
  "gradleVersion": "4.3.1",
  "androidGradlePluginVersion": "3.0.1",
  "kotlinVersion": "1.1.60",
  "numModules": "5",
  "allMethods": "4000",
  "javaPackageCount": "20",
  "javaClassCount": "8",
  "javaMethodCount": "2000",
  "kotlinPackageCount": "20",
  "kotlinClassCount": "8",
  "androidModules": "2",
  "numActivitiesPerAndroidModule": "8",
  "productFlavors": [2, 3],
  "topologies": [
    {"type": "random", "seed": "2"}
  ],
  "dependencies": [
    {"from": 3, "to": 2},
    {"from": 4, "to": 2},
    {"from": 4, "to": 3}
  ],
  "buildTypes": 6
}"#;
