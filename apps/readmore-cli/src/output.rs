//! Plain-text rendering for the terminal

use readmore_core::domain::BookSummary;
use readmore_core::profile::{top_weights, ProfileWeights};
use readmore_core::state::{CardStatus, UserState, WorkStatus};
use readmore_core::views::{DetailView, RecommendationPage, ShelfView};

fn status_marker(card: &CardStatus) -> char {
    match card.status {
        WorkStatus::Liked => '+',
        WorkStatus::Disliked => '-',
        WorkStatus::Neutral => ' ',
    }
}

fn book_line(book: &BookSummary) -> String {
    let year = book
        .first_publish_year
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    format!(
        "{}{} by {}",
        book.display_title(),
        year,
        book.author_names()
    )
}

/// One line per book, prefixed with its rating and shelf markers
pub fn print_cards(books: &[BookSummary], state: &UserState) {
    for book in books {
        let Some(id) = book.work_id() else {
            continue;
        };
        let card = CardStatus::derive(state, &id);
        let saved = if card.saved { '*' } else { ' ' };
        println!(
            "[{}{}] {:<14} {}",
            status_marker(&card),
            saved,
            id.as_str(),
            book_line(book)
        );
    }
}

pub fn print_card_status(id: &str, card: &CardStatus) {
    println!("{}: {}", id, card.status.as_str());
    println!("  {}", card.like_hint());
    println!("  {}", card.dislike_hint());
    if card.save_enabled() {
        println!("  Save to shelf");
    } else {
        println!("  On your shelf");
    }
}

pub fn print_shelf(shelf: &ShelfView, state: &UserState) {
    if shelf.is_empty() {
        println!("Your shelf is empty.");
        return;
    }
    let books: Vec<BookSummary> = shelf.books.iter().map(|b| b.to_summary()).collect();
    print_cards(&books, state);
}

fn print_weights(label: &str, entries: &[(&str, i64)]) {
    println!("{}:", label);
    if entries.is_empty() {
        println!("  (none)");
    }
    for (key, weight) in entries {
        println!("  {:>4}  {}", weight, key);
    }
}

pub fn print_profile(profile: &ProfileWeights, top: usize) {
    if profile.is_empty() {
        println!("No taste profile yet. Like or save some books.");
        return;
    }
    print_weights("Subjects", &top_weights(&profile.subjects, top));
    print_weights("Authors", &top_weights(&profile.authors, top));
    print_weights("Era", &top_weights(&profile.era, top));
}

pub fn print_recommendations(page: &RecommendationPage<'_>, state: &UserState) {
    for rec in page.items {
        let books = std::slice::from_ref(&rec.book);
        print_cards(books, state);
        println!("        score {:.1}", rec.score);
        for reason in &rec.reasons {
            println!("        - {}", reason);
        }
    }
    if page.show_controls() {
        println!("Page {} of {}", page.page, page.total_pages);
    }
}

pub fn print_detail(view: &DetailView, card: &CardStatus) {
    let book = &view.book;
    println!("{}", book.display_title());
    println!("by {}", book.author_names());
    if let Some(year) = book.first_publish_year {
        println!("First published {}", year);
    }
    if !book.subjects.is_empty() {
        println!("Subjects: {}", book.subjects.join(", "));
    }
    if !book.isbn.is_empty() {
        println!("ISBN: {}", book.isbn.join(", "));
    }
    if let Some(url) = &book.cover_url {
        println!("Cover: {}", url);
    }
    println!();
    println!("{}", view.description);
    println!();
    print_card_status(&book.work_id, card);
}
