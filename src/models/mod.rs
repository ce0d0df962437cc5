pub mod recommendation;
pub mod summary;

pub use recommendation::{
    BeautyRecommendation, DisplayMode, LegacyRecommendation, RecommendRequest, RecommendResponse,
    Recommendations,
};
pub use summary::{FormInput, Scalar, Summary};
