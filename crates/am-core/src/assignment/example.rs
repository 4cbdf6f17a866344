//! Built-in example assignment for first-time users

use super::model::{Assignment, Problem, Subsection, SubmissionType};
use crate::types::{now_millis, AssignmentId, ProblemId, SubsectionId};
use chrono::{Days, NaiveDate, NaiveTime};

/// Days between "today" and the example's due date
pub const EXAMPLE_DUE_IN_DAYS: u64 = 14;

/// Message shown once the example has been added
pub const EXAMPLE_LOADED_MESSAGE: &str =
    "Example assignment loaded! Explore the features, then modify or delete it.";

const PREAMBLE: &str = "This is an EXAMPLE ASSIGNMENT to help you explore the Assignment Maker features.

You may submit as many times as you wish up until the deadline. However, late submissions are not accepted.

Note: It is a violation of academic integrity to submit code written by someone else or plots produced by someone else or by using another person's code.

Feel free to modify this example or delete it and create your own assignment!";

const AI_USE_DESCRIPTION: &str = "If you used AI for any aspect of your lab, you must complete a short reflection documenting your AI use.

You must also attach a log (either as a text log, or screenshots) of your interaction with AI. Your log does not need to be exhaustive, but should provide a reasonable overview of your interaction with the AI.

Provide 1-3 sentences in answer to each question below:";

const MATH_DESCRIPTION: &str = r"This section demonstrates LaTeX support in questions. You can use LaTeX notation like $E = mc^2$ for inline math or display equations like:

$$\frac{d}{dt}\left(\frac{\partial L}{\partial \dot{q}}\right) - \frac{\partial L}{\partial q} = 0$$

Try typing LaTeX in your assignment questions!";

const DERIVATION_DESCRIPTION: &str = r"Derive the equation of motion for the system. Your answer should include:

- The kinematic equations used
- Show that $v = v_0 + at$ leads to $x = x_0 + v_0 t + \frac{1}{2}at^2$
- Explain each step clearly";

fn subsection(
    name: &str,
    description: &str,
    points: u32,
    submission_type: SubmissionType,
    max_images: u32,
) -> Subsection {
    Subsection {
        id: SubsectionId::generate(),
        name: name.to_string(),
        description: description.to_string(),
        points,
        submission_type,
        max_images: Some(max_images),
        config: None,
    }
}

fn problem(name: &str, description: &str, subsections: Vec<Subsection>) -> Problem {
    Problem {
        id: ProblemId::generate(),
        name: name.to_string(),
        description: description.to_string(),
        subsections,
    }
}

/// Build the example lab-report assignment, due [`EXAMPLE_DUE_IN_DAYS`] after `today`
pub fn example_assignment(today: NaiveDate) -> Assignment {
    let now = now_millis();
    let problems = vec![
        problem(
            "Summary of the Project",
            "Students should summarize what they learned and accomplished.",
            vec![subsection(
                "",
                "In your own words, write a short summary of what was done for this project. Include the key concepts you learned and any challenges you faced.",
                4,
                SubmissionType::Text,
                1,
            )],
        ),
        problem(
            "Data Analysis",
            "Submit your analysis plots and partner information.",
            vec![
                subsection(
                    "Your Data Plot",
                    "This question refers to your final result at the end of Step 1 in the lab manual. Include below the annotated plot produced from your own data. Make sure axes are labeled and the plot has a title.",
                    4,
                    SubmissionType::Image,
                    1,
                ),
                subsection(
                    "Partner's Data Plot",
                    "This question refers to Step 2 in the lab manual. Include below the annotated plot produced from your partner's data. Compare and contrast with your own results.",
                    4,
                    SubmissionType::Image,
                    1,
                ),
                subsection(
                    "",
                    "Your partner's name (for verification purposes)",
                    1,
                    SubmissionType::Text,
                    1,
                ),
            ],
        ),
        problem(
            "Use of AI",
            AI_USE_DESCRIPTION,
            vec![
                subsection(
                    "AI Tools Used",
                    "Which AI tool(s) did you use? E.g. Cursor, ChatGPT, Gemini, Claude, GitHub Copilot, etc.",
                    2,
                    SubmissionType::Text,
                    1,
                ),
                subsection(
                    "How AI Was Used",
                    "Describe how you used AI in your lab. E.g. to help with debugging, to suggest ways to improve efficiency/clarity of your code, to explain concepts, etc.",
                    2,
                    SubmissionType::Text,
                    1,
                ),
                subsection(
                    "Verification Steps",
                    "What steps did you take to verify that the responses given to you by the AI were accurate and appropriate for your work?",
                    2,
                    SubmissionType::Text,
                    1,
                ),
                subsection(
                    "AI Chat Logs",
                    "Attach your AI chat logs here as screenshots or images. Include the key prompts you used.",
                    4,
                    SubmissionType::Image,
                    3,
                ),
            ],
        ),
        problem(
            "Mathematical Analysis (Bonus Example)",
            MATH_DESCRIPTION,
            vec![subsection(
                "Equation Derivation",
                DERIVATION_DESCRIPTION,
                5,
                SubmissionType::Text,
                2,
            )],
        ),
    ];

    Assignment {
        id: AssignmentId::generate(),
        course_code: "ENG6".to_string(),
        title: "Mini-Project 2: Motion Analysis and Plotting Lab Report (Example)".to_string(),
        due_date: today.checked_add_days(Days::new(EXAMPLE_DUE_IN_DAYS)),
        due_time: NaiveTime::from_hms_opt(23, 59, 0),
        preamble: PREAMBLE.to_string(),
        problems,
        created_at: now,
        updated_at: now,
    }
}
