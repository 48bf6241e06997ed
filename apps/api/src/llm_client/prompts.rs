// Prompt templates for chat queries and assistant provisioning.

/// Chat prompt for a resume question. `{reference}` is either empty or a
/// knowledge-base excerpt block; `{document}` is the matched section or the
/// whole resume.
pub const QUERY_PROMPT_TEMPLATE: &str =
    "{reference}Based on the nursing resume knowledge base:\n\n{document}\n\nUser: {query}\nAI:";

pub const REFERENCE_BLOCK_TEMPLATE: &str = "Reference guidance ({section}):\n{body}\n\n";

/// Fixed assistant instructions; the caller's description is prepended.
pub const ASSISTANT_INSTRUCTIONS: &str = "\
Welcome to the Nursing Resume Assistant, specialized for international nurses. \
This assistant is designed to guide you through customizing your resume to meet Canadian healthcare standards, \
as outlined in the attached nursing knowledge documents. We recommend following these steps for optimal assistance: \
1. Upload Your Resume: Start by uploading your current resume for analysis. \
2. Upload a Job Description: Next, upload a job description for a role you are interested in. \
3. Interactive Queries: Ask specific questions about adapting your resume to the job description and Canadian standards. \
4. Skill Gap Analysis: The assistant will help identify any skill gaps compared to Canadian nursing requirements. \
5. Resume Enhancement: Receive suggestions for improving your resume, including keyword optimization and alignment with Canadian standards. \
6. Tailored Advice: Get personalized advice for customizing your resume, based on your professional experience and the job you're targeting. \
Feel free to navigate these steps in any order, and use the attached knowledge documents for detailed guidance.";

pub fn build_query_prompt(reference: Option<(&str, &str)>, document: &str, query: &str) -> String {
    let reference = reference
        .map(|(section, body)| {
            REFERENCE_BLOCK_TEMPLATE
                .replace("{section}", section)
                .replace("{body}", body)
        })
        .unwrap_or_default();

    QUERY_PROMPT_TEMPLATE
        .replace("{reference}", &reference)
        .replace("{document}", document)
        .replace("{query}", query)
}
