/*!
 * Document handling: the in-memory tree, block extraction, first-page
 * replacement, and reconstruction.
 */

pub use self::extract::{extract_blocks, BlockLocation, ContentBlock, ExtractedDocument};
pub use self::first_page::{insert_template, FirstPagePlan, TEMPLATE_IMAGE};
pub use self::model::{
    BlockRef, Cell, Document, Element, Hyperlink, Image, Paragraph, ParagraphFormat, Run,
    RunStyle, Table,
};
pub use self::reconstruct::reconstruct;

pub mod extract;
pub mod first_page;
pub mod model;
pub mod reconstruct;
