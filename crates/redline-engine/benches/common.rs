// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_document(sections: usize) -> String {
    let mut content = String::from("---\ntitle: Bench\n---\n");
    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str("Some paragraph content with multiple sentences. It were long enough to matter.\n\n");
        content.push_str("```rust\nfn example() {\n\n    println!(\"Hello\");\n}\n```\n\n");
    }
    content
}

#[allow(dead_code)]
pub fn generate_annotated(changes: usize) -> String {
    let base = concat!(
        "The cat <del comment=\"tense\" replace-with=\"sits\">sat</del> on ",
        "<ins comment=\"article &amp; tone\">the </ins>mat. ",
        "<edit comment=\"style\"><del>Really</del><ins>Truly</ins></edit> done.\n\n",
    );
    base.repeat(changes.div_ceil(3))
}

/// An answer judging every block of `generate_document(sections)`.
#[allow(dead_code)]
pub fn generate_response(sections: usize) -> String {
    let mut response = String::new();
    for section in 0..sections {
        let first = section * 3 + 1;
        response.push_str(&format!("{first} lgtm\n"));
        response.push_str(&format!(
            "{} Some paragraph content with multiple sentences. It <del comment=\"agreement\" replace-with=\"was\">were</del> long enough to matter.\n",
            first + 1
        ));
        response.push_str(&format!("{} LGTM\n", first + 2));
    }
    response
}
