use scoby_core::samples::parse_sample_input;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse `ID` or `ID:REPLICATES`; replicates default to 1.
pub fn parse_tea_selection(raw: &str) -> anyhow::Result<(u32, u32)> {
    let (id, replicates) = raw.split_once(':').unwrap_or((raw, "1"));
    let id = id
        .trim()
        .parse::<u32>()
        .map_err(|error| anyhow::anyhow!("invalid tea id in '{raw}': {error}"))?;
    let replicates = replicates
        .trim()
        .parse::<u32>()
        .map_err(|error| anyhow::anyhow!("invalid replicate count in '{raw}': {error}"))?;
    Ok((id, replicates))
}

/// Optional measurement text; absent or non-numeric text is no value.
pub fn parse_measurement(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_sample_input)
}
