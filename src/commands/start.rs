//! `/start` and `/help`: the command overview.

use crate::ui::format::Reply;
use crate::ui::text;

pub fn run() -> Reply {
    Reply::plain(text::START)
}
