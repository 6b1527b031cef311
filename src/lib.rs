pub mod app;

// Re-export useful types for library users
pub use app::advisor::{Advisor, RecommendationSource};
pub use app::config::AppConfig;
pub use app::error::{ClientError, ExportError, ValidationError};
pub use app::export::GenerationPlan;
pub use app::formatter::OutputGenerator;
pub use app::generate_report;
pub use app::generators::GeneratorKind;
pub use app::inspector::{Inspector, MetadataSource};
pub use app::models::{
    ColumnMetadata, Confidence, ConstraintDetail, RecommendationEntry, RecommendationResponse,
    RelationshipInfo, RelationshipKind, TableInfo, TableMetadataResponse, TableRole,
};
pub use app::recommend::{AUTO_ACCEPT_THRESHOLD, GeneratorSelections, merge};
pub use app::relationships::resolve;
pub use app::session::{Applied, Session};
pub use app::transport::HttpTransport;
