pub mod response;
pub mod series;

pub use response::{
    AreaChart, AreasResponse, ComparisonResult, ErrorEnvelope, QueryRequest, QueryResponse,
    QueryResult, Row, UploadResponse, COMPARISON_MARKER,
};
pub use series::{Rates, TrendSeries};
