//! Built-in stopword list.
//!
//! Portuguese function words that the upload tool excluded by default:
//! articles, prepositions and their contractions, demonstratives and
//! conjunctions. They rarely carry meaning as the first word of a product or
//! service description.

/// Default stopwords, in display order.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "de", "para", "com", "sem", "em", "por", "que", "os", "as", "um", "uma",
    "ao", "aos", "do", "da", "dos", "das", "no", "na", "nos", "nas", "pelo",
    "pela", "pelos", "pelas", "este", "esta", "estes", "estas", "esse",
    "essa", "esses", "essas", "aquele", "aquela", "aqueles", "aquelas",
    "ou", "e", "mas", "porém", "entretanto", "contudo", "quando", "enquanto",
    "como", "porque", "pois", "assim", "então", "logo", "portanto", "desse",
    "dessa", "destes", "destas", "deste", "isso", "isto", "aquilo",
];
