use chrono::{TimeZone, Utc};
use serde_json::json;
use speculate2::speculate;
use tubedash::activity::{Activity, ActivityRecorder};
use tubedash::db::Database;
use tubedash::models::*;

fn new_note(video_id: &str, content: &str) -> NewNote {
    NewNote {
        video_id: video_id.to_string(),
        content: content.to_string(),
    }
}

fn new_event(event_type: &str) -> NewEventLogEntry {
    NewEventLogEntry {
        event_type: event_type.to_string(),
        video_id: None,
        comment_id: None,
        user_id: None,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        details: None,
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "notes" {
        describe "create_note" {
            it "stores a note with a generated id and creation time" {
                let before = Utc::now();
                let note = db.create_note(new_note("abc123", "Check the intro"))
                    .expect("Failed to create note");

                assert_eq!(note.video_id, "abc123");
                assert_eq!(note.content, "Check the intro");
                assert!(!note.id.is_nil());
                assert!(note.created_at >= before - chrono::Duration::milliseconds(1));
            }

            it "generates distinct ids" {
                let a = db.create_note(new_note("abc123", "one")).expect("Failed to create");
                let b = db.create_note(new_note("abc123", "two")).expect("Failed to create");
                assert_ne!(a.id, b.id);
            }
        }

        describe "get_notes_by_video" {
            it "returns empty list when the video has no notes" {
                let notes = db.get_notes_by_video("nothing-here").expect("Query failed");
                assert!(notes.is_empty());
            }

            it "returns notes newest first" {
                db.create_note(new_note("abc123", "first")).expect("Failed to create");
                db.create_note(new_note("abc123", "second")).expect("Failed to create");
                db.create_note(new_note("abc123", "third")).expect("Failed to create");

                let notes = db.get_notes_by_video("abc123").expect("Query failed");
                let contents: Vec<_> = notes.iter().map(|n| n.content.as_str()).collect();
                assert_eq!(contents, vec!["third", "second", "first"]);
            }

            it "only returns notes for the requested video" {
                db.create_note(new_note("abc123", "mine")).expect("Failed to create");
                db.create_note(new_note("xyz789", "theirs")).expect("Failed to create");

                let notes = db.get_notes_by_video("abc123").expect("Query failed");
                assert_eq!(notes.len(), 1);
                assert_eq!(notes[0].content, "mine");
            }

            it "returns the stored note unchanged" {
                let created = db.create_note(new_note("abc123", "exact")).expect("Failed to create");
                let notes = db.get_notes_by_video("abc123").expect("Query failed");
                assert_eq!(notes, vec![created]);
            }
        }

        describe "count_notes" {
            it "counts across videos" {
                db.create_note(new_note("a", "1")).expect("Failed to create");
                db.create_note(new_note("b", "2")).expect("Failed to create");
                assert_eq!(db.count_notes().expect("Query failed"), 2);
            }
        }
    }

    describe "event log" {
        describe "append_event" {
            it "stores an entry with only the required fields" {
                let entry = db.append_event(new_event("note_added")).expect("Failed to append");

                assert_eq!(entry.event_type, "note_added");
                assert!(entry.video_id.is_none());
                assert!(entry.comment_id.is_none());
                assert!(entry.user_id.is_none());
                assert!(entry.details.is_none());
                assert_eq!(db.count_events().expect("Query failed"), 1);
            }

            it "stores every optional field" {
                let entry = db.append_event(NewEventLogEntry {
                    video_id: Some("abc123".to_string()),
                    comment_id: Some("c1".to_string()),
                    user_id: Some("u1".to_string()),
                    details: Some(json!({ "content": "hi", "nested": { "n": 1 } })),
                    ..new_event("comment_replied")
                }).expect("Failed to append");

                assert_eq!(entry.video_id.as_deref(), Some("abc123"));
                assert_eq!(entry.comment_id.as_deref(), Some("c1"));
                assert_eq!(entry.user_id.as_deref(), Some("u1"));
                assert_eq!(entry.details, Some(json!({ "content": "hi", "nested": { "n": 1 } })));
            }

            it "keeps the caller supplied timestamp" {
                let entry = db.append_event(new_event("comment_deleted")).expect("Failed to append");
                assert_eq!(entry.timestamp, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
            }
        }

        describe "count_events" {
            it "starts at zero" {
                assert_eq!(db.count_events().expect("Query failed"), 0);
            }
        }
    }

    describe "activity recorder" {
        it "appends in the background" {
            let recorder = ActivityRecorder::new(db.clone());
            tokio_test::block_on(async {
                recorder
                    .record(Activity::new(EventType::NoteAdded, json!({ "content": "x" })).video("abc123"))
                    .await
                    .expect("record task panicked");
            });
            assert_eq!(db.count_events().expect("Query failed"), 1);
        }
    }

    describe "unmigrated database" {
        it "reports storage errors instead of panicking" {
            let raw = Database::open_memory().expect("Failed to create in-memory database");
            assert!(raw.create_note(new_note("abc123", "x")).is_err());
            assert!(raw.append_event(new_event("note_added")).is_err());
        }
    }
}

mod on_disk {
    use super::*;

    #[test]
    fn notes_survive_reopening_the_database() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("tubedash.db");

        {
            let db = Database::open(path.clone()).expect("Failed to open");
            db.migrate().expect("Failed to migrate");
            db.create_note(new_note("abc123", "persisted")).expect("Failed to create");
        }

        let db = Database::open(path).expect("Failed to reopen");
        db.migrate().expect("Failed to migrate");
        let notes = db.get_notes_by_video("abc123").expect("Query failed");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "persisted");
    }
}
