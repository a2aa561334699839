use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Data", inline)]
#[serde(default)]
/// Point data source and column mapping.
pub struct DataOptions {
    /// CSV location: URL, protocol-relative URL, or local path.
    #[schemars(skip)]
    pub url: String,
    /// Header of the latitude column.
    #[schemars(skip)]
    pub lat_column: String,
    /// Header of the longitude column.
    #[schemars(skip)]
    pub lng_column: String,
    /// Header of the column summed into each bin.
    #[schemars(skip)]
    pub weight_column: String,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self {
            url: "pop.csv".into(),
            lat_column: "lat".into(),
            lng_column: "lng".into(),
            weight_column: "pop".into(),
        }
    }
}
