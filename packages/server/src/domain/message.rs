//! Text fragments and broadcast blocks.
//!
//! Every outbound payload is plain text carrying HTML markup; browser
//! clients render each block as HTML.

use super::value_object::DisplayName;

/// Marker placed between two fragments of a block.
pub const LINE_BREAK: &str = "<BR>";

/// System notice queued when a client joins.
pub fn join_notice(name: &DisplayName) -> String {
    format!("<B>{name}</B> has joined the chat.")
}

/// System notice queued when a client leaves.
pub fn leave_notice(name: &DisplayName) -> String {
    format!("<B>{name}</B> has left the chat.")
}

/// Chat line attributed to `name`.
pub fn chat_line(name: &DisplayName, text: &str) -> String {
    format!("<B>{name}:</B> {text}")
}

/// Merge drained fragments into a single block, preserving order.
///
/// Returns `None` when there is nothing to send.
pub fn merge_block(fragments: &[String]) -> Option<String> {
    if fragments.is_empty() {
        return None;
    }
    Some(fragments.join(LINE_BREAK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_format() {
        // テスト項目: 入室・退室通知の書式
        let alice = DisplayName::from("alice");

        assert_eq!(join_notice(&alice), "<B>alice</B> has joined the chat.");
        assert_eq!(leave_notice(&alice), "<B>alice</B> has left the chat.");
    }

    #[test]
    fn test_chat_line_format() {
        // テスト項目: チャット行は送信者名で修飾される
        let alice = DisplayName::from("alice");

        assert_eq!(chat_line(&alice, "hi"), "<B>alice:</B> hi");
    }

    #[test]
    fn test_merge_block_joins_in_order_without_trailing_marker() {
        // テスト項目: 断片は順序通りに区切り記号で連結され、末尾には付かない
        // given (前提条件):
        let fragments = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        // when (操作):
        let block = merge_block(&fragments);

        // then (期待する結果):
        assert_eq!(block.as_deref(), Some("A<BR>B<BR>C"));
    }

    #[test]
    fn test_merge_block_empty_is_none() {
        // テスト項目: 断片が無ければブロックは作られない
        assert_eq!(merge_block(&[]), None);
    }

    #[test]
    fn test_merge_block_single_fragment() {
        // テスト項目: 断片が 1 つなら区切り記号は入らない
        let fragments = vec!["<B>alice</B> has joined the chat.".to_string()];

        assert_eq!(
            merge_block(&fragments).as_deref(),
            Some("<B>alice</B> has joined the chat.")
        );
    }
}
