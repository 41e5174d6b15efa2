pub fn build_metadata_prompt(excerpt: &str) -> String {
    format!(
        r#"Extract the title and topic of the following research paper.

INSTRUCTIONS:
1. The title is the paper's own title, as written
2. The topic is a short label (2-5 words) for the research area
3. Output exactly two lines in the format below, nothing else

FORMAT:
Title: <paper title>
Topic: <research topic>

PAPER:
{}"#,
        excerpt
    )
}

pub fn build_key_points_prompt(excerpt: &str) -> String {
    format!(
        r#"Identify the five key discussion points of the following research paper.

INSTRUCTIONS:
1. Each point is one short sentence
2. Cover, in this order: the main objective, the methodology, the key findings, the implications, and future directions
3. Output exactly five lines in the format below, nothing else

FORMAT:
Point1: <main objective>
Point2: <methodology>
Point3: <key findings>
Point4: <implications>
Point5: <future directions>

PAPER:
{}"#,
        excerpt
    )
}
