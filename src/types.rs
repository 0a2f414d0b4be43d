/// Stable feature identifier used to correlate baseline geometry with its
/// update history (category prefix + short digest, or an upstream id).
/// Examples: `border:1a2b3c4d5e`, `checkpoint:9f8e7d6c5b`, `node/4305157022`
pub type FeatureId = String;
/// Reported operational status for a feature.
/// Examples: `open`, `closed`, `restricted`, `destroyed`
pub type StatusText = String;
/// Normalized ISO-8601 UTC timestamp string as persisted in update logs.
/// Example: `2025-03-01T00:00:00Z`
pub type TimestampText = String;
/// Composite key hashed into a derived feature id.
/// Example: `34.2|31.5|rafah crossing`
pub type IdentityKey = String;
/// Free-form tag attached to an update record.
/// Examples: `convoy`, `unverified`, `field-report`
pub type Tag = String;
