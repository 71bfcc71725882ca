use crate::types::{ConversationFlow, Discussion, Note, ThreadMetadata, ThreadStatistics};

/// A note together with its thread placement, as selected by triage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriagedNote {
    pub note: Note,
    pub metadata: ThreadMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadTriage {
    /// Notes that warrant a new action item, in discussion order.
    pub actionable: Vec<TriagedNote>,
    /// Non-system notes that only provide conversational context.
    pub context: Vec<TriagedNote>,
    pub statistics: ThreadStatistics,
}

/// Derives one `ThreadMetadata` per note, indexed by position (1-based).
pub fn thread_metadata(discussion: &Discussion) -> Vec<ThreadMetadata> {
    let count = discussion.notes.len();
    (0..count)
        .map(|idx| ThreadMetadata {
            discussion_id: discussion.id.clone(),
            is_resolved: discussion.resolved,
            thread_position: (idx + 1) as u32,
            conversation_flow: flow_for(idx, count, discussion.resolved),
        })
        .collect()
}

fn flow_for(idx: usize, count: usize, resolved: bool) -> ConversationFlow {
    if idx == 0 {
        ConversationFlow::Opening
    } else if resolved && idx + 1 == count {
        ConversationFlow::Resolution
    } else {
        ConversationFlow::Reply
    }
}

/// Whether the note warrants a new action item. The thread's opening
/// comment is the reviewer's feedback item; replies and resolutions are
/// conversational context. System notes are never actionable.
pub fn warrants_action(note: &Note, metadata: &ThreadMetadata, include_resolved: bool) -> bool {
    if note.system {
        return false;
    }
    if metadata.conversation_flow != ConversationFlow::Opening {
        return false;
    }
    include_resolved || !metadata.is_resolved
}

/// Tags every note with thread metadata and splits the set into actionable
/// and context-only notes. System notes land in neither set but are counted
/// in the statistics.
pub fn triage_discussions(discussions: &[Discussion], include_resolved: bool) -> ThreadTriage {
    let mut triage = ThreadTriage::default();
    triage.statistics.discussions = discussions.len();

    for discussion in discussions {
        if discussion.resolved {
            triage.statistics.resolved_threads += 1;
        }
        let metadata = thread_metadata(discussion);
        for (note, metadata) in discussion.notes.iter().zip(metadata) {
            triage.statistics.notes += 1;
            if note.system {
                triage.statistics.system_notes += 1;
                continue;
            }
            let entry = TriagedNote {
                note: note.clone(),
                metadata,
            };
            if warrants_action(note, &entry.metadata, include_resolved) {
                triage.statistics.actionable_notes += 1;
                triage.actionable.push(entry);
            } else {
                triage.statistics.context_notes += 1;
                triage.context.push(entry);
            }
        }
    }

    triage
}
