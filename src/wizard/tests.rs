#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::config::Config;
    use crate::llm::client::{LlmError, Role, ScriptedModel};
    use crate::wizard::{
        ActionOutcome, StageError, Wizard, WizardAction, WizardContext, WizardError, WizardStep,
    };

    const KEYWORDS_REPLY: &str = "設計思考 / Design Thinking\n使用者經驗 / User Experience\n服務設計 / Service Design";

    const TITLES_REPLY: &str = "===建議研究題目===\n1. 理論導向：\n設計思考理論整合 / Integrating Design Thinking Theory\n（聚焦理論框架）\n\n2. 實務導向：\n服務設計實務策略 / Practical Strategies for Service Design\n（針對實務問題）\n\n3. 整合導向：\n使用者經驗評估模型 / A User Experience Evaluation Model\n（結合理論與實務）";

    const PURPOSE_REPLY: &str =
        "===研究目的===\n本研究旨在探討設計思考於服務設計中的應用。\n===參考文獻===\nBrown, T. (2008). Design thinking.";

    const PLAN_REPLY: &str = r#"{"sections": [{"title_zh": "設計思考", "title_en": "Design Thinking", "search_queries": [{"focus": "理論", "query": "What is design thinking?"}]}, {"title_zh": "服務設計", "title_en": "Service Design"}]}"#;

    struct Fixture {
        _temp_dir: TempDir,
        model: Arc<ScriptedModel>,
        wizard: Wizard,
    }

    fn fixture(replies: &[&str]) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            purpose_file: temp_dir.path().join(".research_purpose.tmp"),
            output_path: temp_dir.path().join("docs"),
            ..Config::default()
        };
        let model = Arc::new(ScriptedModel::with_replies(replies.iter().copied()));
        let context = WizardContext::with_model(config, model.clone());
        Fixture {
            _temp_dir: temp_dir,
            model,
            wizard: Wizard::new(context),
        }
    }

    /// 产生并选择关键词，停在第 3 步
    async fn run_to_literature(wizard: &mut Wizard) {
        wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "探討設計思考於服務設計的應用".to_string(),
            })
            .await
            .unwrap();
        wizard
            .dispatch(WizardAction::SelectKeywords(vec![
                "設計思考 / Design Thinking".to_string(),
                "服務設計 / Service Design".to_string(),
            ]))
            .await
            .unwrap();
    }

    async fn run_to_purpose(wizard: &mut Wizard) {
        run_to_literature(wizard).await;
        wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "Brown (2008) 提出設計思考流程。".to_string(),
            })
            .await
            .unwrap();
        wizard.dispatch(WizardAction::SelectTitle(0)).await.unwrap();
        wizard.dispatch(WizardAction::GeneratePurpose).await.unwrap();
    }

    #[tokio::test]
    async fn test_keywords_then_search_query() {
        let mut f = fixture(&[KEYWORDS_REPLY]);

        let outcome = f
            .wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "內容".to_string(),
            })
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::Keywords(ref k) if k.len() == 3));
        assert_eq!(f.wizard.step(), WizardStep::Keywords);

        let outcome = f
            .wizard
            .dispatch(WizardAction::SelectKeywords(vec![
                "設計思考 / Design Thinking".to_string(),
                "使用者經驗 / User Experience".to_string(),
            ]))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::SearchQuery {
                query: "Design Thinking User Experience".to_string(),
                url: Some(
                    "https://scispace.com/search?q=Design+Thinking+User+Experience".to_string()
                ),
            }
        );
        assert_eq!(f.wizard.step(), WizardStep::Literature);

        let requests = f.model.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, 0.3);
        assert_eq!(requests[0].max_tokens, None);
        assert_eq!(requests[0].model, "gpt-3.5-turbo");
        assert!(requests[0].joined(Role::User).contains("設計思考"));
    }

    #[tokio::test]
    async fn test_select_unknown_keyword() {
        let mut f = fixture(&[KEYWORDS_REPLY]);
        f.wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "內容".to_string(),
            })
            .await
            .unwrap();

        let before = f.wizard.state().clone();
        let err = f
            .wizard
            .dispatch(WizardAction::SelectKeywords(vec!["不存在 / Missing".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::InvalidSelection(_)));
        assert_eq!(f.wizard.state(), &before);
    }

    #[tokio::test]
    async fn test_titles_without_summary_makes_no_call() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY]);
        run_to_literature(&mut f.wizard).await;
        assert_eq!(f.model.call_count().await, 1);

        let err = f
            .wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WizardError::Stage(StageError::MissingPrerequisite(_))
        ));
        assert_eq!(f.model.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_state_identical() {
        let mut f = fixture(&[KEYWORDS_REPLY]);
        f.wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "內容".to_string(),
            })
            .await
            .unwrap();
        f.model.push_failure("connection reset").await;

        let before = f.wizard.state().clone();
        let before_bytes = serde_json::to_vec(f.wizard.state()).unwrap();

        let err = f
            .wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "新主題".to_string(),
                content: "新內容".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::Stage(StageError::Transport(LlmError::Transport(
                "connection reset".to_string()
            )))
        );
        assert_eq!(f.wizard.state(), &before);
        assert_eq!(serde_json::to_vec(f.wizard.state()).unwrap(), before_bytes);
    }

    #[tokio::test]
    async fn test_malformed_titles_keep_raw_response() {
        let mut f = fixture(&[KEYWORDS_REPLY, "抱歉，我無法產生題目"]);
        run_to_literature(&mut f.wizard).await;

        let before = f.wizard.state().clone();
        let err = f
            .wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.raw_response(), Some("抱歉，我無法產生題目"));
        assert_eq!(f.wizard.state(), &before);
        assert_eq!(f.wizard.step(), WizardStep::Literature);
    }

    #[tokio::test]
    async fn test_select_title_out_of_range() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY]);
        run_to_literature(&mut f.wizard).await;

        let err = f.wizard.dispatch(WizardAction::SelectTitle(0)).await.unwrap_err();
        assert!(matches!(err, WizardError::MissingPrerequisite(_)));

        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap();
        let err = f.wizard.dispatch(WizardAction::SelectTitle(3)).await.unwrap_err();
        assert!(matches!(err, WizardError::InvalidSelection(_)));
        assert_eq!(f.wizard.step(), WizardStep::Titles);
    }

    #[tokio::test]
    async fn test_purpose_is_saved_to_store() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY, PURPOSE_REPLY]);
        run_to_purpose(&mut f.wizard).await;

        assert_eq!(f.wizard.step(), WizardStep::Purpose);
        assert_eq!(
            f.wizard.state().purpose(),
            Some("本研究旨在探討設計思考於服務設計中的應用。")
        );
        assert_eq!(
            f.wizard.context().purpose_store.load(),
            "本研究旨在探討設計思考於服務設計中的應用。"
        );

        let requests = f.model.requests().await;
        assert_eq!(requests[2].temperature, 0.7);
        assert_eq!(requests[2].max_tokens, Some(2500));
    }

    #[tokio::test]
    async fn test_purpose_store_failure_only_warns() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            // 目录无法当作文件写入
            purpose_file: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        let model = Arc::new(ScriptedModel::with_replies([
            KEYWORDS_REPLY,
            TITLES_REPLY,
            PURPOSE_REPLY,
        ]));
        let mut wizard = Wizard::new(WizardContext::with_model(config, model));

        run_to_purpose(&mut wizard).await;
        assert!(wizard.state().purpose().is_some());
    }

    #[tokio::test]
    async fn test_enter_literature_review_requires_purpose() {
        let mut f = fixture(&[]);
        let err = f
            .wizard
            .dispatch(WizardAction::EnterLiteratureReview)
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::MissingPrerequisite(_)));
        assert_eq!(f.wizard.step(), WizardStep::Topic);
    }

    #[tokio::test]
    async fn test_literature_actions_require_step_eight() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY, PURPOSE_REPLY]);
        run_to_purpose(&mut f.wizard).await;

        let err = f.wizard.dispatch(WizardAction::PlanSections).await.unwrap_err();
        assert_eq!(err, WizardError::NotInLiteratureReview(WizardStep::Purpose));
        assert_eq!(f.model.call_count().await, 3);

        f.wizard
            .dispatch(WizardAction::EnterLiteratureReview)
            .await
            .unwrap();
        assert_eq!(f.wizard.step(), WizardStep::LiteratureReview);
    }

    #[tokio::test]
    async fn test_step_never_moves_backwards() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY, KEYWORDS_REPLY]);
        run_to_literature(&mut f.wizard).await;
        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(f.wizard.step(), WizardStep::Titles);

        let err = f.wizard.advance_to(WizardStep::Keywords).unwrap_err();
        assert_eq!(
            err,
            WizardError::StepRegression {
                from: WizardStep::Titles,
                to: WizardStep::Keywords,
            }
        );

        // 重新生成关键词不会退回第 2 步
        f.wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "內容".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(f.wizard.step(), WizardStep::Titles);
        assert_eq!(f.wizard.state().selected_keywords().len(), 2);
    }

    #[tokio::test]
    async fn test_titles_require_selected_keywords() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY]);
        f.wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "內容".to_string(),
            })
            .await
            .unwrap();

        let before = f.wizard.state().clone();
        let err = f
            .wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::Stage(StageError::MissingPrerequisite("選定的關鍵詞".to_string()))
        );
        assert_eq!(f.model.call_count().await, 1);
        assert_eq!(f.wizard.state(), &before);
        assert_eq!(f.wizard.step(), WizardStep::Keywords);
    }

    #[tokio::test]
    async fn test_regenerated_titles_clear_stale_selection() {
        let other_titles = "===建議研究題目===\n1. 理論導向：\n服務主導邏輯 / Service-Dominant Logic\n（理論回顧）";
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY, other_titles]);
        run_to_literature(&mut f.wizard).await;
        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap();
        f.wizard.dispatch(WizardAction::SelectTitle(0)).await.unwrap();
        assert_eq!(f.wizard.step(), WizardStep::Purpose);

        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "新的摘要".to_string(),
            })
            .await
            .unwrap();
        assert!(f.wizard.state().selected_title().is_none());
        assert_eq!(f.wizard.step(), WizardStep::Purpose);

        // 没有选定题目时不会呼叫模型
        let err = f.wizard.dispatch(WizardAction::GeneratePurpose).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Stage(StageError::MissingPrerequisite(_))
        ));
        assert_eq!(f.model.call_count().await, 3);

        f.wizard.dispatch(WizardAction::SelectTitle(0)).await.unwrap();
        assert_eq!(
            f.wizard.state().selected_title().map(|t| t.title.as_str()),
            Some("服務主導邏輯 / Service-Dominant Logic")
        );
    }

    #[tokio::test]
    async fn test_regenerated_titles_keep_selection_still_offered() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY, TITLES_REPLY]);
        run_to_literature(&mut f.wizard).await;
        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap();
        f.wizard.dispatch(WizardAction::SelectTitle(1)).await.unwrap();

        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(
            f.wizard.state().selected_title().map(|t| t.title.as_str()),
            Some("服務設計實務策略 / Practical Strategies for Service Design")
        );
    }

    #[tokio::test]
    async fn test_step_entry_conditions() {
        let mut f = fixture(&[KEYWORDS_REPLY, TITLES_REPLY]);

        // 第 2 步之前没有可选的关键词
        let err = f
            .wizard
            .dispatch(WizardAction::SelectKeywords(vec!["設計思考 / Design Thinking".to_string()]))
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::MissingPrerequisite(_)));

        for step in [
            WizardStep::Keywords,
            WizardStep::Literature,
            WizardStep::Titles,
            WizardStep::Purpose,
            WizardStep::LiteratureReview,
        ] {
            let err = f.wizard.advance_to(step).unwrap_err();
            assert!(matches!(err, WizardError::MissingPrerequisite(_)), "{step}");
            assert_eq!(f.wizard.step(), WizardStep::Topic);
        }

        f.wizard
            .dispatch(WizardAction::GenerateKeywords {
                topic: "設計思考".to_string(),
                content: "內容".to_string(),
            })
            .await
            .unwrap();
        assert!(f.wizard.advance_to(WizardStep::Keywords).is_ok());
        assert!(matches!(
            f.wizard.advance_to(WizardStep::Literature),
            Err(WizardError::MissingPrerequisite(_))
        ));

        let err = f
            .wizard
            .dispatch(WizardAction::SelectKeywords(Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::InvalidSelection(_)));
        assert_eq!(f.wizard.step(), WizardStep::Keywords);

        f.wizard
            .dispatch(WizardAction::SelectKeywords(vec!["服務設計 / Service Design".to_string()]))
            .await
            .unwrap();
        assert_eq!(f.wizard.step(), WizardStep::Literature);
        assert!(matches!(
            f.wizard.advance_to(WizardStep::Titles),
            Err(WizardError::MissingPrerequisite(_))
        ));

        f.wizard
            .dispatch(WizardAction::GenerateTitles {
                literature_summary: "摘要".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(f.wizard.step(), WizardStep::Titles);

        // 选定题目之前无法生成研究目的
        let err = f.wizard.dispatch(WizardAction::GeneratePurpose).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::Stage(StageError::MissingPrerequisite(_))
        ));
        assert_eq!(f.model.call_count().await, 2);
        assert_eq!(f.wizard.step(), WizardStep::Titles);
    }

    #[tokio::test]
    async fn test_advance_to_literature_review_requires_purpose() {
        let mut f = fixture(&[]);
        let err = f
            .wizard
            .advance_to(WizardStep::LiteratureReview)
            .unwrap_err();
        assert_eq!(
            err,
            WizardError::MissingPrerequisite("研究目的內容".to_string())
        );
        assert_eq!(f.wizard.step(), WizardStep::Topic);
    }

    #[tokio::test]
    async fn test_resumed_literature_review() {
        let f = fixture(&[]);
        f.wizard.context().purpose_store.save("已儲存的研究目的").unwrap();

        let context = f.wizard.context().clone();
        let mut wizard = Wizard::resume_from_store(context).unwrap();
        assert_eq!(wizard.step(), WizardStep::LiteratureReview);
        assert_eq!(wizard.state().purpose(), Some("已儲存的研究目的"));

        f.model.push_reply(PLAN_REPLY).await;
        let outcome = wizard.dispatch(WizardAction::PlanSections).await.unwrap();
        assert!(matches!(outcome, ActionOutcome::SectionPlan(ref s) if s.len() == 2));

        let requests = f.model.requests().await;
        assert_eq!(requests[0].temperature, 0.3);
        assert_eq!(requests[0].max_tokens, Some(2000));
        assert!(requests[0].joined(Role::User).contains("已儲存的研究目的"));
    }

    #[tokio::test]
    async fn test_resume_from_missing_store_fails() {
        let f = fixture(&[]);
        let err = Wizard::resume_from_store(f.wizard.context().clone()).unwrap_err();
        assert!(matches!(err, WizardError::MissingPrerequisite(_)));
    }

    #[tokio::test]
    async fn test_collect_literature_and_reviews() {
        let section_reply = "===文獻探討===\n設計思考章節論述\n===參考文獻===\nBrown, T. (2008).";
        let full_reply = "===文獻探討===\n完整論述\n===參考文獻===\nBrown, T. (2008).\nNorman, D. (2013).";
        let analysis_reply = r#"{"literature": [{"citation": "Norman, D. (2013).", "abstract": "日常用品設計"}]}"#;

        let f = fixture(&[PLAN_REPLY, analysis_reply, section_reply, full_reply]);
        let mut wizard =
            Wizard::resume_literature_review(f.wizard.context().clone(), "研究目的").unwrap();

        let err = wizard
            .dispatch(WizardAction::GenerateSectionReview { section: 1 })
            .await
            .unwrap_err();
        assert_eq!(err, WizardError::UnknownSection(1));

        wizard.dispatch(WizardAction::PlanSections).await.unwrap();

        let err = wizard
            .dispatch(WizardAction::GenerateSectionReview { section: 1 })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WizardError::Stage(StageError::MissingPrerequisite(_))
        ));
        assert_eq!(f.model.call_count().await, 1);

        let outcome = wizard
            .dispatch(WizardAction::AddLiterature {
                section: 1,
                citation: "Brown, T. (2008).".to_string(),
                summary: "設計思考流程".to_string(),
            })
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::LiteratureAdded { total: 1, .. }));

        let outcome = wizard
            .dispatch(WizardAction::AnalyzeLiterature {
                section: 1,
                text: "Norman, D. (2013). The design of everyday things.".to_string(),
            })
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::LiteratureAdded { total: 2, .. }));

        let err = wizard
            .dispatch(WizardAction::AddLiterature {
                section: 5,
                citation: "X".to_string(),
                summary: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, WizardError::UnknownSection(5));

        let outcome = wizard
            .dispatch(WizardAction::GenerateSectionReview { section: 1 })
            .await
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::SectionReview { section: 1, .. }));
        assert_eq!(
            wizard.state().section_review(1).map(|d| d.content.as_str()),
            Some("設計思考章節論述")
        );

        wizard.dispatch(WizardAction::GenerateFullReview).await.unwrap();
        let full = wizard.state().full_review().unwrap();
        assert_eq!(full.content, "完整論述");

        let requests = f.model.requests().await;
        assert_eq!(requests[2].max_tokens, Some(3000));
        assert_eq!(requests[3].max_tokens, Some(4000));
    }
}
