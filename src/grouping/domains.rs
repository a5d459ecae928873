//! Columns of the derived booklist table.
//!
//! Grouping values are materialized under `blg_*` names so they never clash
//! with the catalog columns they are computed from.

use std::sync::LazyLock;

use crate::schema::domain::{Domain, DomainRef};
use crate::sql::types::DataType;

macro_rules! blg {
    ($($id:ident = $name:literal : $ty:ident;)*) => {
        $(
            pub static $id: LazyLock<DomainRef> =
                LazyLock::new(|| Domain::new($name, DataType::$ty).build());
        )*
    };
}

/// Path of a row in the grouping tree.
pub static BLG_NODE_KEY: LazyLock<DomainRef> =
    LazyLock::new(|| Domain::new("node_key", DataType::Text).not_null().build());

/// 1-based depth; books sit one below the innermost group.
pub static BLG_LEVEL: LazyLock<DomainRef> =
    LazyLock::new(|| Domain::new("level", DataType::Integer).not_null().build());

blg! {
    BLG_AUTHOR_ID = "blg_author_id": Integer;
    BLG_AUTHOR_NAME = "blg_author_name": Text;
    BLG_AUTHOR_IS_COMPLETE = "blg_author_complete": Boolean;
    BLG_AUTHOR_POSITION = "blg_author_position": Integer;

    BLG_SERIES_ID = "blg_series_id": Integer;
    BLG_SERIES_TITLE = "blg_series_title": Text;
    BLG_SERIES_IS_COMPLETE = "blg_series_complete": Boolean;
    BLG_SERIES_NUM_FLOAT = "blg_series_num_float": Real;
    BLG_SERIES_NUM = "blg_series_num": Text;
    BLG_SERIES_TITLE_1ST_CHAR = "blg_series_title_1st": Text;

    BLG_PUBLISHER_ID = "blg_publisher_id": Integer;
    BLG_PUBLISHER_NAME = "blg_publisher_name": Text;
    BLG_BOOKSHELF_ID = "blg_bookshelf_id": Integer;
    BLG_BOOKSHELF_NAME = "blg_bookshelf_name": Text;

    BLG_GENRE = "blg_genre": Text;
    BLG_READ_STATUS = "blg_read_status": Boolean;
    BLG_LOANEE = "blg_loanee": Text;
    BLG_FORMAT = "blg_format": Text;
    BLG_LOCATION = "blg_location": Text;
    BLG_LANGUAGE = "blg_language": Text;
    BLG_RATING = "blg_rating": Integer;
    BLG_COLOR = "blg_color": Text;
    BLG_CONDITION = "blg_condition": Integer;
    BLG_BOOK_TITLE_1ST_CHAR = "blg_title_1st": Text;

    BLG_DATE_PUBLISHED_YEAR = "blg_pub_y": Integer;
    BLG_DATE_PUBLISHED_MONTH = "blg_pub_m": Integer;
    BLG_DATE_FIRST_PUBLICATION_YEAR = "blg_first_pub_y": Integer;
    BLG_DATE_FIRST_PUBLICATION_MONTH = "blg_first_pub_m": Integer;
    BLG_DATE_READ_YEAR = "blg_rd_y": Integer;
    BLG_DATE_READ_MONTH = "blg_rd_m": Integer;
    BLG_DATE_READ_DAY = "blg_rd_d": Integer;
    BLG_DATE_ADDED_YEAR = "blg_add_y": Integer;
    BLG_DATE_ADDED_MONTH = "blg_add_m": Integer;
    BLG_DATE_ADDED_DAY = "blg_add_d": Integer;
    BLG_DATE_LAST_UPDATE_YEAR = "blg_upd_y": Integer;
    BLG_DATE_LAST_UPDATE_MONTH = "blg_upd_m": Integer;
    BLG_DATE_LAST_UPDATE_DAY = "blg_upd_d": Integer;
    BLG_DATE_ACQUIRED_YEAR = "blg_acq_y": Integer;
    BLG_DATE_ACQUIRED_MONTH = "blg_acq_m": Integer;
    BLG_DATE_ACQUIRED_DAY = "blg_acq_d": Integer;
}
