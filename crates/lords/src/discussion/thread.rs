use lords_core::Comment;
use serde::Serialize;
use std::collections::HashMap;

/// A top-level comment and every reply beneath it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    pub root: Comment,
    pub replies: Vec<Comment>,
}

/// Group comments into single-level threads.
///
/// Roots keep their input order and so do replies within a thread. A reply
/// to a reply is attached to the top-level comment it descends from. A
/// reply whose parent is not in `comments` becomes a root itself, as does
/// any comment caught in a parent cycle.
pub fn thread_comments(comments: &[Comment]) -> Vec<CommentThread> {
    let parents: HashMap<i64, Option<i64>> = comments
        .iter()
        .map(|c| (c.comment_id, c.parent_id))
        .collect();

    // walk up to the top-level ancestor; a comment whose chain never reaches
    // one (parent cycle) is its own root
    let top_level = |comment: &Comment| -> i64 {
        let mut current = comment.comment_id;
        let mut parent = comment.parent_id;
        for _ in 0..=comments.len() {
            match parent {
                Some(p) if parents.contains_key(&p) && p != current => {
                    current = p;
                    parent = parents.get(&p).copied().flatten();
                }
                Some(p) if p == current => return comment.comment_id,
                _ => return current,
            }
        }
        comment.comment_id
    };

    let mut threads: Vec<CommentThread> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    for comment in comments {
        if top_level(comment) == comment.comment_id {
            index.insert(comment.comment_id, threads.len());
            threads.push(CommentThread {
                root: comment.clone(),
                replies: Vec::new(),
            });
        }
    }
    for comment in comments {
        let root = top_level(comment);
        if root == comment.comment_id {
            continue;
        }
        if let Some(&i) = index.get(&root) {
            threads[i].replies.push(comment.clone());
        }
    }
    threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use lords_core::ModelId;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            comment_id: id,
            model_id: ModelId::new(1),
            author: None,
            content: format!("comment {}", id),
            parent_id: parent,
            created_at: None,
        }
    }

    #[test]
    fn test_replies_grouped_under_roots() {
        let comments = vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
            comment(5, Some(3)),
        ];
        let threads = thread_comments(&comments);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].root.comment_id, 1);
        let replies: Vec<_> = threads[0].replies.iter().map(|c| c.comment_id).collect();
        assert_eq!(replies, vec![2, 4]);
        assert_eq!(threads[1].replies[0].comment_id, 5);
    }

    #[test]
    fn test_nested_reply_flattens_to_top_level() {
        let comments = vec![comment(1, None), comment(2, Some(1)), comment(3, Some(2))];
        let threads = thread_comments(&comments);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].replies.len(), 2);
    }

    #[test]
    fn test_orphan_reply_promoted() {
        let comments = vec![comment(1, None), comment(2, Some(99))];
        let threads = thread_comments(&comments);
        assert_eq!(threads.len(), 2);
        assert_eq!(threads[1].root.comment_id, 2);
    }

    #[test]
    fn test_parent_cycle_promotes_to_roots() {
        let comments = vec![
            comment(4, Some(1)),
            comment(1, Some(2)),
            comment(2, Some(1)),
            comment(7, Some(7)),
            comment(8, None),
        ];
        let threads = thread_comments(&comments);

        let roots: Vec<_> = threads.iter().map(|t| t.root.comment_id).collect();
        assert_eq!(roots, vec![4, 1, 2, 7, 8]);
        assert!(threads.iter().all(|t| t.replies.is_empty()));
    }

    #[test]
    fn test_reply_listed_before_parent() {
        let comments = vec![comment(2, Some(1)), comment(1, None)];
        let threads = thread_comments(&comments);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].root.comment_id, 1);
        assert_eq!(threads[0].replies[0].comment_id, 2);
    }
}
