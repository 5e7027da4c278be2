mod collection;
mod ids;
mod media;
mod membership;
mod metadata;

pub use collection::{
    Collection, CollectionInput, CollectionPatch, CollectionSummary, CreateCollection,
    UpdateCollection,
};
pub use ids::{CollectionId, MediaId, UserId};
pub use media::{
    format_date, parse_stored_date, CreateMedia, Media, MediaInput, MediaPatch, MediaStatus,
    MediaSummary, MediaType, UpdateMedia,
};
pub use membership::{
    LinkInput, LinkMedia, Membership, MembershipDiff, ReplaceMemberships, MAX_RATING, MIN_RATING,
};
pub use metadata::{MetadataInput, MetadataPair, MetadataSet, RawMetadataPair};
