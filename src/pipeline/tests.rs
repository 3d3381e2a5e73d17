use super::*;
use crate::pipeline::casual::{replies, CasualKind};
use crate::pipeline::followup::{questions, Topic};
use crate::pipeline::segmenter::SEE_MORE_BUBBLE;

const INVENTORY_REPLY: &str = "\
Here is what matches your search in our showroom today.

Best electric matches:
- EQA 250 | AED 185,000 | 429 km range
- EQB 350 | AED 219,000 | 423 km range
- EQS 450 | AED 399,000 | 640 km range
- EQE 300 | AED 289,000 | 550 km range";

#[test]
fn greeting_input_yields_exactly_one_pool_bubble() {
    for input in ["hi", "hello!", "thanks", "bye"] {
        let bubbles = segment_reply(input, "anything the backend said");
        assert_eq!(bubbles.len(), 1, "input: {input}");

        let all_pools: Vec<&str> = [
            replies(CasualKind::Greeting),
            replies(CasualKind::Thanks),
            replies(CasualKind::Smalltalk),
            replies(CasualKind::Farewell),
        ]
        .concat();
        assert!(all_pools.contains(&bubbles[0].as_str()));
    }
}

#[test]
fn short_replies_pass_through_unmodified() {
    let bubbles = segment_reply("do you deliver?", "Hello.");
    assert_eq!(bubbles, vec!["Hello.".to_string()]);
}

#[test]
fn empty_replies_fall_back_to_a_notice() {
    let bubbles = segment_reply("do you deliver?", "   ");
    assert_eq!(bubbles, vec![EMPTY_REPLY_FALLBACK.to_string()]);
}

#[test]
fn long_replies_end_with_a_follow_up_question() {
    let query = "show me your electric SUVs";
    let bubbles = segment_reply(query, INVENTORY_REPLY);

    let last = bubbles.last().unwrap();
    assert!(questions(Topic::Type).contains(&last.as_str()));

    // Same exchange, same output: the pick is deterministic.
    assert_eq!(bubbles, segment_reply(query, INVENTORY_REPLY));
}

#[test]
fn inventory_replies_are_segmented_formatted_and_truncated() {
    let bubbles = segment_reply("what do EQ models cost?", INVENTORY_REPLY);

    // Intro sentence, header, one batch of three, see-more, follow-up.
    assert!(bubbles.iter().any(|b| b.starts_with("Here is what matches")));
    assert!(bubbles.iter().any(|b| b.contains("Best electric")));

    let list_bubble = bubbles
        .iter()
        .find(|b| b.contains("EQA 250"))
        .expect("list bubble present");
    assert_eq!(list_bubble.matches('•').count(), 3);
    assert!(list_bubble.contains("**AED 185,000**"));
    assert!(list_bubble.contains("**429 km**"));
    assert!(!list_bubble.contains("EQE 300"));

    assert!(bubbles.iter().any(|b| b.contains(SEE_MORE_BUBBLE)));

    let last = bubbles.last().unwrap();
    assert!(questions(Topic::Price).contains(&last.as_str()));
}

#[test]
fn bubbles_arrive_in_source_order() {
    let bubbles = segment_reply("compare the EQA and EQB specs", INVENTORY_REPLY);
    let intro = bubbles.iter().position(|b| b.starts_with("Here is what"));
    let header = bubbles.iter().position(|b| b.contains("Best electric"));
    let list = bubbles.iter().position(|b| b.contains("EQA 250"));
    assert!(intro < header && header < list);
}

#[test]
fn call_to_action_lands_on_the_last_content_bubble() {
    let reply = "The GLC has a five-year warranty. \
                 Every purchase includes two years of free servicing at any of our locations.";
    let bubbles = segment_reply("tell me about aftercare", reply);

    let follow_up = bubbles.last().unwrap();
    let content_last = &bubbles[bubbles.len() - 2];
    assert!(
        content_last.contains("Let me know if you'd like the full details!"),
        "got: {content_last}"
    );
    assert!(follow_up.contains('?'));
}
