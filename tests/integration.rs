//! Integration tests for the library and its command dispatcher.

use online_library::{
    DispatchConfig, Dispatcher, EventFilter, FeedConfig, Library, LibraryEvent, Price, Tier,
};

/// Run a script through a fresh dispatcher and return the output lines.
fn run_script(script: &str) -> Vec<String> {
    let mut dispatcher = Dispatcher::new(Library::new(), Vec::new(), DispatchConfig::default());
    dispatcher.run(script.as_bytes()).unwrap();

    let (_, out) = dispatcher.into_parts();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// --- Scenarios ---

#[test]
fn test_subscriber_notified_on_price_update() {
    let out = run_script(
        "createUser standard alice\n\
         createBook T A 10\n\
         subscribe alice\n\
         updatePrice T 20\n\
         end\n",
    );

    assert!(out.contains(&"alice notified about price update for T to 20".to_string()));
}

#[test]
fn test_standard_user_cannot_listen() {
    let out = run_script(
        "createUser standard bob\n\
         createBook T A 10\n\
         listenBook bob T\n\
         end\n",
    );

    assert_eq!(out, vec!["No access"]);
    assert!(out.iter().all(|line| !line.contains("listening")));
}

#[test]
fn test_access_denied_before_book_lookup() {
    let out = run_script(
        "createUser standard bob\n\
         listenBook bob T\n\
         end\n",
    );

    assert_eq!(out, vec!["No access"]);
}

#[test]
fn test_premium_user_listens() {
    let out = run_script(
        "createUser premium carol\n\
         createBook T A 10\n\
         listenBook carol T\n\
         end\n",
    );

    assert_eq!(out, vec!["carol listening T by A"]);
}

#[test]
fn test_full_session_transcript() {
    let out = run_script(
        "createBook Dune Herbert 10\n\
         createBook Emma Austen 7\n\
         createUser standard alice\n\
         createUser premium carol\n\
         createUser premium alice\n\
         createBook Dune Someone 1\n\
         readBook alice Dune\n\
         listenBook alice Dune\n\
         listenBook carol Emma\n\
         subscribe carol\n\
         subscribe alice\n\
         subscribe carol\n\
         updatePrice Dune 12\n\
         unsubscribe carol\n\
         unsubscribe carol\n\
         updatePrice Emma 5\n\
         end\n",
    );

    assert_eq!(
        out,
        vec![
            "User already exists",
            "Book already exists",
            "alice reading Dune by Herbert",
            "No access",
            "carol listening Emma by Austen",
            "User already subscribed",
            "carol notified about price update for Dune to 12",
            "alice notified about price update for Dune to 12",
            "User is not subscribed",
            "alice notified about price update for Emma to 5",
        ]
    );
}

#[test]
fn test_lines_after_terminator_are_ignored() {
    let out = run_script(
        "createUser premium carol\n\
         createBook T A 10\n\
         end\n\
         listenBook carol T\n",
    );

    assert!(out.is_empty());
}

#[test]
fn test_reading_list_and_playlist_commands() {
    let out = run_script(
        "createUser premium carol\n\
         createUser standard bob\n\
         createBook T A 10\n\
         createBook U B 12\n\
         addToReadList bob U\n\
         addToReadList bob T\n\
         addToReadList bob T\n\
         showReadList bob\n\
         readList bob\n\
         addToPlaylist bob T\n\
         addToPlaylist carol T\n\
         addToPlaylist carol U\n\
         removeFromPlaylist carol T\n\
         removeFromPlaylist carol T\n\
         showPlaylist carol\n\
         listenPlaylist carol\n\
         end\n",
    );

    assert_eq!(
        out,
        vec![
            "Book already in the list",
            "bob to-read list: [U, T]",
            "bob reading U by B",
            "bob reading T by A",
            "No access",
            "Book is not in the list",
            "carol playlist: [U]",
            "carol listening U by B",
        ]
    );
}

// --- Library API ---

#[test]
fn test_distinct_entities_all_retrievable() {
    let library = Library::new();
    let names = ["alice", "bob", "carol", "dave"];
    for (i, name) in names.iter().enumerate() {
        let tier = if i % 2 == 0 { Tier::Standard } else { Tier::Premium };
        library.create_user(name, tier).unwrap();
        library
            .create_book(&format!("book-{i}"), name, Price::new(i.to_string()))
            .unwrap();
    }

    for (i, name) in names.iter().enumerate() {
        assert_eq!(library.user(name).unwrap().name, *name);
        let book = library.book(&format!("book-{i}")).unwrap();
        assert_eq!(book.author, *name);
        assert_eq!(book.price, Price::new(i.to_string()));
    }
    assert_eq!(library.stats().users, 4);
    assert_eq!(library.stats().premium_users, 2);
}

#[test]
fn test_unsubscribed_users_stop_receiving() {
    let library = Library::new();
    let feed = library.watch(FeedConfig::unbounded(EventFilter::notifications()));

    library.create_user("alice", Tier::Standard).unwrap();
    library.create_user("bob", Tier::Premium).unwrap();
    library.create_book("T", "A", Price::new("10")).unwrap();

    library.subscribe("alice").unwrap();
    library.subscribe("bob").unwrap();
    library.update_price("T", Price::new("11")).unwrap();

    library.unsubscribe("alice").unwrap();
    library.update_price("T", Price::new("12")).unwrap();

    let notified: Vec<(String, String)> = feed
        .drain()
        .into_iter()
        .map(|event| match event {
            LibraryEvent::PriceNotified { user, price, .. } => (user, price.to_string()),
            other => panic!("Expected PriceNotified, got {:?}", other),
        })
        .collect();

    assert_eq!(
        notified,
        vec![
            ("alice".to_string(), "11".to_string()),
            ("bob".to_string(), "11".to_string()),
            ("bob".to_string(), "12".to_string()),
        ]
    );
}

#[test]
fn test_lifecycle_feed_sees_every_change() {
    let library = Library::new();
    let feed = library.watch(FeedConfig::unbounded(EventFilter::lifecycle()));

    library.create_user("alice", Tier::Premium).unwrap();
    library.create_book("T", "A", Price::new("10")).unwrap();
    library.subscribe("alice").unwrap();
    library.update_price("T", Price::new("20")).unwrap();
    library.unsubscribe("alice").unwrap();
    library.read_book("T", "alice").unwrap();

    assert_eq!(
        feed.drain(),
        vec![
            LibraryEvent::UserCreated {
                user: "alice".into(),
                tier: Tier::Premium,
            },
            LibraryEvent::BookCreated {
                title: "T".into(),
                author: "A".into(),
                price: Price::new("10"),
            },
            LibraryEvent::Subscribed {
                user: "alice".into(),
            },
            LibraryEvent::PriceChanged {
                title: "T".into(),
                old: Price::new("10"),
                new: Price::new("20"),
            },
            LibraryEvent::Unsubscribed {
                user: "alice".into(),
            },
        ]
    );
}

#[test]
fn test_multiple_feeds_receive_independently() {
    let library = Library::new();
    let everything = library.watch(FeedConfig::unbounded(EventFilter::all()));
    let notifications = library.watch(FeedConfig::unbounded(EventFilter::notifications()));

    library.create_user("alice", Tier::Standard).unwrap();
    library.create_book("T", "A", Price::new("10")).unwrap();
    library.subscribe("alice").unwrap();
    library.update_price("T", Price::new("20")).unwrap();

    assert_eq!(everything.drain().len(), 5);
    assert_eq!(notifications.drain().len(), 1);

    library.unwatch(everything.id);
    library.update_price("T", Price::new("30")).unwrap();
    assert!(everything.drain().is_empty());
    assert_eq!(notifications.drain().len(), 1);
}
