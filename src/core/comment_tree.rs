//! Comment threads, walked with an explicit stack so thread depth never turns
//! into call-stack depth.

use crate::core::contract::{Contract, ContractReport, ContractRules};
use crate::domain::feed::Comment;
use crate::domain::model::Id;

pub const DEFAULT_MAX_COMMENT_DEPTH: usize = 8;

/// Depth of the deepest comment; a comment without replies has depth 1.
pub fn max_depth(root: &Comment) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(root, 1usize)];
    while let Some((comment, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(comment.replies().iter().map(|reply| (reply, depth + 1)));
    }
    deepest
}

pub fn count(root: &Comment) -> usize {
    let mut total = 0;
    let mut stack = vec![root];
    while let Some(comment) = stack.pop() {
        total += 1;
        stack.extend(comment.replies());
    }
    total
}

/// Pre-order listing with the depth of each comment, as a thread is rendered.
pub fn flatten(root: &Comment) -> Vec<(usize, &Comment)> {
    let mut out = Vec::new();
    let mut stack = vec![(root, 1usize)];
    while let Some((comment, depth)) = stack.pop() {
        out.push((depth, comment));
        // reversed so the first reply is visited first
        stack.extend(comment.replies().iter().rev().map(|reply| (reply, depth + 1)));
    }
    out
}

pub fn find(root: &Comment, id: Id) -> Option<&Comment> {
    let mut stack = vec![root];
    while let Some(comment) = stack.pop() {
        if comment.id == id {
            return Some(comment);
        }
        stack.extend(comment.replies());
    }
    None
}

/// Checks a whole thread: nesting limit, reply linkage and reply counters.
/// Nothing below the depth limit is visited.
pub fn check_thread(root: &Comment, rules: &ContractRules, report: &mut ContractReport) {
    const ENTITY: &str = "comment";

    let mut stack = vec![(root, 1usize)];
    while let Some((comment, depth)) = stack.pop() {
        comment.author.check(rules, report);

        let replies = comment.replies();
        if replies.len() as u64 > comment.replies_count {
            report.record(
                ENTITY,
                Some(comment.id),
                "replies",
                format!(
                    "{} embedded replies but replies_count is {}",
                    replies.len(),
                    comment.replies_count
                ),
            );
        }

        if replies.is_empty() {
            continue;
        }
        if depth >= rules.max_comment_depth {
            report.record(
                ENTITY,
                Some(comment.id),
                "replies",
                format!("thread nests deeper than {} levels", rules.max_comment_depth),
            );
            continue;
        }

        for reply in replies {
            if reply.parent != Some(comment.id) {
                report.record(
                    ENTITY,
                    Some(reply.id),
                    "parent",
                    format!("embedded under comment {} but parent is {:?}", comment.id, reply.parent),
                );
            }
            if reply.post != comment.post {
                report.record(
                    ENTITY,
                    Some(reply.id),
                    "post",
                    format!("reply is on post {} but its parent is on post {}", reply.post, comment.post),
                );
            }
            stack.push((reply, depth + 1));
        }
    }
}
