//! Demonstration of allocate-and-forget strings
//!
//! Builds a string step by step without ever freeing an intermediate result,
//! then prints what the heap reserved along the way.

use purr_runtime::{HeapConfig, concatenate, configure_heap};

fn main() {
    println!("=== Purrgram Runtime Concat Demo ===\n");

    let heap = configure_heap(HeapConfig::from_env()).expect("heap already started");

    let words = [c"allocate", c" and", c" forget"];
    let mut sentence = concatenate(Some(c""), Some(c"")).expect("empty concat");
    for word in words {
        sentence = concatenate(Some(sentence.as_c_str()), Some(word)).expect("concat failed");
        println!("  {sentence:?} ({} bytes)", sentence.len());
    }

    println!("\nNull operand: {:?}", concatenate(None, Some(c"ignored")));

    let stats = heap.stats();
    println!("\nHeap statistics:");
    println!("  allocations:     {}", stats.allocations);
    println!("  bytes requested: {}", stats.bytes_requested);
    println!("  bytes reserved:  {}", stats.bytes_reserved);
    println!("  failures:        {}", stats.failures);
}
