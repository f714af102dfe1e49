use crate::schema::AccountSummary;

pub const KEYWORD: &str = "producto";
pub const HASHTAG: &str = "#oferta";

/// Builds the two marketing prompts for the top account.
///
/// 1. five short commercial captions in the account's style, using
///    the fixed keyword and hashtag
/// 2. six 15-second video ideas about the keyword, modelled on the
///    account's most viral videos
///
/// Only the account identifier varies between runs.
pub fn generate_prompts(top: &AccountSummary) -> [String; 2] {
    let account = &top.account;

    let captions = format!(
        "Genera 5 captions estilo '{account}' utilizando la keyword \
         '{KEYWORD}' y el hashtag '{HASHTAG}'. Deben ser cortos, con CTA y en tono comercial."
    );

    let video_ideas = format!(
        "Genera 6 ideas de video de 15 segundos sobre el '{KEYWORD}' con hook inicial \
         persuasivo, similares a los videos más virales de la cuenta '{account}'."
    );

    [captions, video_ideas]
}
