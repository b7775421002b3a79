//! Valentine messages that live entirely inside a shareable link.
//!
//! A [`CombinedMessage`] is validated from loosely-typed JSON, serialized,
//! deflated and base64-encoded into the `data` query parameter of a `/view`
//! link. Opening the link reverses the pipeline and validates again.

pub mod compression;
pub mod error;
pub mod link;
pub mod message;
pub mod no_button;
pub mod payload;
pub mod primitives;
pub mod schema;
pub mod search_params;
pub mod types;
pub mod utils;

pub use error::{Error, Issue, IssueKind, Result, ValidationErrors};
pub use link::{build_shareable_link, ShareLinkBuilder};
pub use message::{
    create_default_combined_message, create_default_intro, create_default_outro,
    CombinedMessage, Dialog, DialogFanfare, IntroMessage, NoButtonAction, NoButtonClickActions,
    OutroMessage, SharedIntroOutroFields, TextAndImageSegment,
};
pub use no_button::{CaptionPhase, NoButtonCycler, NoClickEffect};
pub use payload::{
    decode_message, decode_message_or_default, decode_payload, decode_payload_or_default,
    encode_message, encode_payload, EncodedPayload,
};
pub use primitives::{NonEmptyText, PrimitiveError, UrlString};
pub use schema::Schema;
pub use search_params::{
    extract_data_param, extract_data_param_from_link, extract_data_param_from_query,
    extract_data_param_from_url, extract_data_param_from_value,
};
pub use types::*;
